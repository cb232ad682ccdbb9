pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{BreedApiClient, DogCeoClient, PetfinderClient};
pub use config::AppConfig;
pub use crate::core::{adoption::AdoptionFinder, breed_filter::select_match, matcher::BreedMatcher};
pub use utils::error::{PetError, Result};
