//! deck - NASA image slideshow builder
//!
//! ## Usage
//!
//! ```bash
//! # Build a slideshow and save it
//! deck build "The Apollo program" --output apollo.json
//!
//! # Only plan the outline
//! deck outline "Voyager's grand tour"
//!
//! # Query the image archive directly
//! deck search Saturn rings --limit 5
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use deck::{
    DebugLevel, DeckConfig, DeckOutput, ImageSearch, NasaImageClient, Result, SlideshowOrchestrator,
    telemetry,
};
use std::path::PathBuf;
use tracing::info;

/// deck - build slideshows from NASA's image archive
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output verbosity level
    #[arg(short = 'd', long, value_enum, global = true)]
    debug: Option<CliDebugLevel>,
}

/// CLI debug level (maps to DebugLevel)
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDebugLevel {
    /// Only errors and the final result
    Minimal,
    /// Slide-by-slide progress (default)
    Normal,
    /// Every workflow step
    Verbose,
    /// Everything, including candidate lists and logs
    Debug,
}

impl From<CliDebugLevel> for DebugLevel {
    fn from(cli: CliDebugLevel) -> Self {
        match cli {
            CliDebugLevel::Minimal => DebugLevel::Minimal,
            CliDebugLevel::Normal => DebugLevel::Normal,
            CliDebugLevel::Verbose => DebugLevel::Verbose,
            CliDebugLevel::Debug => DebugLevel::Debug,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan a presentation and pick an image for every slide
    Build {
        /// What the presentation should be about
        #[arg(required = true)]
        request: Vec<String>,
        /// Write the slideshow as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Attempts per slide before the judge decides
        #[arg(long)]
        max_attempts: Option<u32>,
    },
    /// Plan the outline only
    Outline {
        #[arg(required = true)]
        request: Vec<String>,
    },
    /// Search the NASA image archive
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of results
        #[arg(short, long, default_value_t = 8)]
        limit: usize,
    },
    /// List the stored sizes of an image
    Variants {
        nasa_id: String,
    },
    /// Print and validate configuration
    Config,
}

fn print_config(config: &DeckConfig) {
    let key_status = if config.model.api_key.is_empty() { "not set".red() } else { "set".green() };
    println!("{}", "Configuration:".yellow().bold());
    println!(
        "  Model:           {} ({})",
        config.model.deployment.cyan(),
        if config.model.endpoint.is_empty() { "no endpoint" } else { config.model.endpoint.as_str() }
    );
    println!("  API Version:     {}", config.model.api_version);
    println!("  API Key:         {key_status}");
    println!(
        "  Attempts:        {} per slide, {} workflow steps",
        config.workflow.max_attempts, config.workflow.max_iterations
    );
    println!(
        "  Search:          {} results, {} shown to the researcher",
        config.workflow.max_search_results, config.workflow.max_candidates
    );
    println!(
        "  NASA API:        {} ({}-{})",
        config.nasa.base_url, config.nasa.year_start, config.nasa.year_end
    );
    println!("  Debug Level:     {}", config.debug_level.to_string().cyan());
    println!();
}

async fn build(config: &DeckConfig, request: &str, output_path: Option<PathBuf>) -> Result<()> {
    let orchestrator = SlideshowOrchestrator::from_config(config)?;
    let output = DeckOutput::new(config.debug_level);

    info!(request = %request, "building slideshow");
    let slideshow = orchestrator.run(request, |event| output.render(&event)).await?;
    output.print_slideshow(&slideshow);

    if let Some(path) = output_path {
        slideshow.save_json(&path)?;
        println!("\n{} {}", "Saved to".green(), path.display().to_string().cyan());
    }
    Ok(())
}

async fn outline(config: &DeckConfig, request: &str) -> Result<()> {
    let orchestrator = SlideshowOrchestrator::from_config(config)?;
    let outline = orchestrator.generate_outline(request).await?;
    DeckOutput::new(config.debug_level).print_outline(&outline);
    Ok(())
}

async fn search(config: &DeckConfig, query: &str, limit: usize) -> Result<()> {
    let client = NasaImageClient::new(&config.nasa)?;
    let images = client.search(query, limit).await?;
    DeckOutput::new(config.debug_level).print_images(&images);
    Ok(())
}

async fn variants(config: &DeckConfig, nasa_id: &str) -> Result<()> {
    let client = NasaImageClient::new(&config.nasa)?;
    let urls = client.image_variants(nasa_id).await;
    if urls.is_empty() {
        println!("{}", format!("No assets found for {nasa_id}").yellow());
    }
    for url in urls {
        println!("{url}");
    }
    Ok(())
}

async fn run(cli: Cli, mut config: DeckConfig) -> Result<()> {
    match cli.command {
        Commands::Build { request, output, max_attempts } => {
            if let Some(attempts) = max_attempts {
                config.workflow.max_attempts = attempts;
                config.workflow.cover_attempts();
                config.validate()?;
            }
            if config.debug_level.is_verbose() {
                print_config(&config);
            }
            build(&config, &request.join(" "), output).await
        }
        Commands::Outline { request } => outline(&config, &request.join(" ")).await,
        Commands::Search { query, limit } => search(&config, &query.join(" "), limit).await,
        Commands::Variants { nasa_id } => variants(&config, &nasa_id).await,
        Commands::Config => {
            print_config(&config);
            match config.model.require_credentials() {
                Ok(()) => println!("{}", "Configuration is valid!".green()),
                Err(e) => println!("{} {}", "Agent commands unavailable:".yellow(), e),
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Ok(path) = dotenvy::dotenv() {
        eprintln!("Loaded config from: {}", path.display());
    }

    let cli = Cli::parse();

    let mut config = match DeckConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "Configuration Error".red().bold(), e);
            eprintln!();
            eprintln!("Set at least:");
            eprintln!("  DECK_APIM_ENDPOINT=https://<gateway>.azure-api.net/<api>");
            eprintln!("  DECK_APIM_KEY=<subscription key>");
            std::process::exit(1);
        }
    };

    if let Some(debug_level) = cli.debug {
        config.debug_level = debug_level.into();
    }

    if let Err(e) = telemetry::init(&config.telemetry, config.debug_level) {
        eprintln!("{}: {}", "Telemetry Warning".yellow(), e);
    }

    if let Err(e) = run(cli, config).await {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
