use clap::Parser;
use pet_finder::config::cli::{Command, MatchArgs, SearchArgs};
use pet_finder::core::render::{self, OutputFormat};
use pet_finder::core::{FilterCriteria, ImageSource, MatchOutcome, SearchOutcome, Species};
use pet_finder::utils::error::ErrorSeverity;
use pet_finder::utils::{logger, validation::Validate};
use pet_finder::{
    AdoptionFinder, AppConfig, BreedApiClient, BreedMatcher, Cli, DogCeoClient, PetfinderClient,
    Result,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Init logging
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pet-finder CLI");
    tracing::debug!("CLI args: {:?}", cli);

    match run(&cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ pet-finder failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!("Configuration loaded: {:?}", config.http);

    match &cli.command {
        Command::Match(args) => run_match(&config, cli.species, args, cli.format).await,
        Command::Breeds { limit } => run_breeds(&config, cli.species, *limit, cli.format).await,
        Command::Image { breed } => run_image(&config, breed, cli.format).await,
        Command::Search(args) => run_search(&config, args, cli.format).await,
    }
}

fn breed_client(config: &AppConfig, species: Species) -> Result<BreedApiClient> {
    let api = match species {
        Species::Dog => &config.dog_api,
        Species::Cat => &config.cat_api,
    };
    BreedApiClient::new(species, api, &config.http)
}

async fn run_match(
    config: &AppConfig,
    species: Species,
    args: &MatchArgs,
    format: OutputFormat,
) -> Result<String> {
    let source = breed_client(config, species)?;
    let criteria = args.criteria();

    if args.dog_ceo_images {
        let images = DogCeoClient::new(&config.dog_ceo, &config.http)?;
        render_match(BreedMatcher::new(source, images), &criteria, format).await
    } else {
        let images = breed_client(config, species)?;
        render_match(BreedMatcher::new(source, images), &criteria, format).await
    }
}

async fn render_match<I: ImageSource>(
    matcher: BreedMatcher<BreedApiClient, I>,
    criteria: &FilterCriteria,
    format: OutputFormat,
) -> Result<String> {
    let outcome = matcher.find_match(criteria).await;

    match (format, &outcome) {
        (OutputFormat::Json, _) => render::to_json(&outcome),
        (OutputFormat::Csv, MatchOutcome::Matched { breed, .. }) => {
            render::breeds_csv(std::slice::from_ref(breed))
        }
        _ => Ok(render::match_summary(&outcome, criteria)),
    }
}

async fn run_breeds(
    config: &AppConfig,
    species: Species,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<String> {
    let source = breed_client(config, species)?;
    let images = DogCeoClient::new(&config.dog_ceo, &config.http)?;
    let matcher = BreedMatcher::new(source, images);

    let breeds = match matcher.list_breeds(limit).await {
        Ok(breeds) => breeds,
        Err(message) => return Ok(format!("ℹ️ {}", message)),
    };

    match format {
        OutputFormat::Text => Ok(render::breeds_text(&breeds)),
        OutputFormat::Json => render::to_json(&breeds),
        OutputFormat::Csv => render::breeds_csv(&breeds),
    }
}

async fn run_image(config: &AppConfig, breed: &str, format: OutputFormat) -> Result<String> {
    let client = DogCeoClient::new(&config.dog_ceo, &config.http)?;

    let image_url = match client.random_image(breed).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Dog CEO unavailable: {}", e);
            None
        }
    };

    if format == OutputFormat::Json {
        return render::to_json(&serde_json::json!({ "breed": breed, "image_url": image_url }));
    }
    Ok(image_url.unwrap_or_else(|| format!("{} for {}", render::NO_IMAGE, breed)))
}

async fn run_search(config: &AppConfig, args: &SearchArgs, format: OutputFormat) -> Result<String> {
    let client = PetfinderClient::new(&config.petfinder, &config.http)?;
    let finder = AdoptionFinder::new(client);
    let outcome = finder.search(&args.request()).await?;

    match (format, &outcome) {
        (OutputFormat::Json, _) => render::to_json(&outcome),
        (OutputFormat::Csv, SearchOutcome::Found { pets }) => render::pets_csv(pets),
        _ => Ok(render::search_text(&outcome)),
    }
}
