//! Partasala API main entry point
//!
//! This is the command-line interface for the partasala.is catalog scraper.
//! It either serves the JSON API or runs a single catalog operation and
//! prints the result.

use clap::{Parser, Subcommand};
use partasala_api::config::{load_config_with_hash, Config};
use partasala_api::{api, Catalog};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Partasala API: scrape the partasala.is vehicle catalog
///
/// Fetches brand, vehicle and image listings from partasala.is and serves
/// them as JSON, either over HTTP or one operation at a time.
#[derive(Parser, Debug)]
#[command(name = "partasala")]
#[command(version)]
#[command(about = "Scraper and JSON API for the partasala.is catalog", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults target the live site)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Serve the JSON API (default)
    Serve {
        /// Address to listen on, overriding the configuration
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Print every brand
    Brands,

    /// Print the vehicles listed for one brand
    Vehicles {
        /// Brand slug (e.g. audi, bmw, toyota)
        brand_slug: String,
    },

    /// Print the vehicles of every brand
    All,

    /// Print one vehicle's details and images
    Detail {
        /// Vehicle slug from the vehicle URL
        car_slug: String,
    },

    /// Print vehicles matching a brand or vehicle name
    Search {
        /// Case-insensitive search text
        query: String,
    },

    /// Validate the configuration and print the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::CheckConfig => handle_check_config(&config),
        Command::Serve { bind } => handle_serve(Catalog::from_config(&config)?, &config, bind).await?,
        Command::Brands => print_json(&Catalog::from_config(&config)?.brands().await?)?,
        Command::Vehicles { brand_slug } => {
            let catalog = Catalog::from_config(&config)?;
            print_json(&catalog.brand_vehicles(&brand_slug).await?)?
        }
        Command::All => {
            let aggregate = Catalog::from_config(&config)?.all_vehicles().await?;
            print_json(&aggregate.vehicles)?
        }
        Command::Detail { car_slug } => {
            let catalog = Catalog::from_config(&config)?;
            print_json(&catalog.vehicle_detail(&car_slug).await?)?
        }
        Command::Search { query } => {
            let aggregate = Catalog::from_config(&config)?.search(&query).await?;
            print_json(&aggregate.vehicles)?
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("partasala=info,partasala_api=info,warn"),
            1 => EnvFilter::new("partasala=debug,partasala_api=debug,info"),
            2 => EnvFilter::new("partasala=trace,partasala_api=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load(path: Option<&PathBuf>) -> partasala_api::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles `check-config`: shows the settings that would be used
fn handle_check_config(config: &Config) {
    println!("=== Partasala API Configuration ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  User agent: {}", config.site.user_agent);
    println!("  Timeout: {}s", config.site.timeout_secs);

    println!("\nServer:");
    println!("  Bind: {}", config.server.bind);

    println!("\nAggregation:");
    println!(
        "  Max concurrent fetches: {}",
        config.aggregation.max_concurrent_fetches
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the default mode: serving the JSON API
async fn handle_serve(
    catalog: Catalog,
    config: &Config,
    bind: Option<SocketAddr>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = match bind {
        Some(addr) => addr,
        None => config.server.bind.parse()?,
    };

    tracing::info!("Starting Partasala.is Scraper API against {}", catalog.base_url());
    tracing::info!("API Documentation: http://{}/", addr);

    api::serve(Arc::new(catalog), addr).await?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
