//! Uptime Monitor Binary

use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uptime_monitor::{Config, EndpointMonitor, Result};

/// Probe configured HTTP endpoints and report per-domain availability
#[derive(Debug, Parser)]
#[command(name = "uptime_monitor", version)]
struct Cli {
    /// Path to the YAML endpoint configuration file
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    initialize_tracing();

    let cli = parse_args();

    info!("Starting uptime monitor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    info!(
        "Monitoring {} endpoints from {}",
        config.endpoints.len(),
        cli.config.display()
    );

    let mut monitor = EndpointMonitor::new(config)?;

    tokio::select! {
        _ = monitor.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Monitoring stopped by user");
        }
    }

    Ok(())
}

/// Parse the command line, exiting with a usage message on misuse
fn parse_args() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            std::process::exit(0);
        }
        _ => {
            eprintln!("Usage: uptime_monitor <config_file_path>");
            std::process::exit(1);
        }
    })
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
