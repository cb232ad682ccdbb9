use crate::core::render::OutputFormat;
use crate::core::{
    ActivityLevel, AnimalType, DogSize, FilterCriteria, HomeSize, PersonalityTrait, SearchRequest,
    Species,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pet-finder")]
#[command(about = "Find a dog breed that fits you, or adoptable pets near you")]
pub struct Cli {
    /// Path to a TOML configuration file (defaults + environment when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines instead of compact text
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Which breed catalog to use
    #[arg(long, value_enum, default_value = "dog", global = true)]
    pub species: Species,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Pick a breed from your preferences
    Match(MatchArgs),
    /// List breeds from the catalog
    Breeds {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Random picture of a breed from Dog CEO
    Image {
        #[arg(long)]
        breed: String,
    },
    /// Search adoptable animals on Petfinder
    Search(SearchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct MatchArgs {
    #[arg(long, value_enum, default_value = "medium")]
    pub activity: ActivityLevel,

    #[arg(long, value_enum, default_value = "house")]
    pub home: HomeSize,

    #[arg(long, value_enum, default_value = "medium")]
    pub size: DogSize,

    #[arg(long, value_enum, default_value = "friendly")]
    pub personality: PersonalityTrait,

    /// Fetch the picture from Dog CEO instead of the breed catalog
    #[arg(long)]
    pub dog_ceo_images: bool,
}

impl MatchArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            activity: self.activity,
            home: self.home,
            size: self.size,
            personality: self.personality,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(long, value_enum, default_value = "dog")]
    pub animal_type: AnimalType,

    /// ZIP code or city
    #[arg(long, default_value = SearchRequest::DEFAULT_LOCATION)]
    pub location: String,

    #[arg(long, default_value_t = SearchRequest::DEFAULT_LIMIT)]
    pub limit: usize,
}

impl SearchArgs {
    pub fn request(&self) -> SearchRequest {
        SearchRequest::new(self.animal_type, self.location.clone()).with_limit(self.limit)
    }
}
