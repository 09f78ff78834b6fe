//! CLI entry point for the Rain or Rainier service.
//!
//! `serve` runs the HTTP API; `check` performs a single fetch and prints the
//! resulting weather record.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rainier::{HttpObservationProvider, RainierConfig, telemetry, weather, web};
use tracing::debug;

#[derive(Parser)]
#[command(name = "rainier", version)]
#[command(about = "Seattle weather and Mount Rainier visibility", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the weather API
    Serve {
        /// Port to listen on; overrides server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch current observations once and print the result as JSON
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RainierConfig::load_from_path(cli.config.clone())?;
    let _telemetry = telemetry::init(&config.logging, cli.verbose)?;
    debug!(?config, "Loaded configuration");

    let provider = HttpObservationProvider::new(&config)
        .context("Failed to create observation HTTP client")?;

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            web::run(port, Arc::new(provider)).await?;
        }
        Commands::Check => {
            let evaluation = weather::evaluate_current(&provider).await;
            let json = serde_json::to_string_pretty(&evaluation.result)
                .context("Failed to serialize weather result")?;
            println!("{json}");
        }
    }

    Ok(())
}
