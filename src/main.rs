//! NHTSA Harvester
//!
//! A tool for harvesting vehicle specification data (make, model, year,
//! trim/variant, curb weight) from the public NHTSA vPIC API into one JSON
//! file per (make, year) pair.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nhtsa_harvester::{Config, Harvester, NhtsaVehiclesService};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "nhtsa-harvester")]
#[command(about = "Harvest vehicle curb weights and trims from the NHTSA vPIC API", long_about = None)]
struct Args {
    /// Path to the configuration YAML file (defaults apply if omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory override
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Config::from_file(path).context("Failed to load configuration")?
        }
        None => Config::default(),
    };
    if let Some(output) = args.output {
        config.output.path = output.to_string_lossy().into_owned();
    }

    info!("Executing NHTSA vehicle specification harvest...");
    info!(
        "Years {}..={}, output directory {}",
        config.harvest.start_year, config.harvest.end_year, config.output.path
    );

    let service = NhtsaVehiclesService::new(config.api.clone());
    let harvester = Harvester::new(service, &config);
    let summary = harvester.run().await?;

    info!(
        "Harvest complete: {} records across {} makes and {} years",
        summary.records_written, summary.makes_processed, summary.years_processed
    );

    Ok(())
}
