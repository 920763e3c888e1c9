//! Nemesis host telemetry collector.
//!
//! Samples host resource usage and the link state of one network interface,
//! writing each as a flat JSON snapshot file on its own refresh interval.

use anyhow::Result;
use clap::Parser;
use nemesis::config::CollectorConfig;
use nemesis::{LoggingConfig, supervisor};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Host telemetry collector.
#[derive(Parser, Debug)]
#[command(name = "nemesis")]
#[command(about = "Writes periodic host and network-link snapshots as JSON files")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format)
    #[arg(short, long, default_value = "nemesis.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration (falls back to defaults if missing/unreadable);
    // a failed load is reported below, once tracing is up
    let (config, config_error) = CollectorConfig::load_or_default(&args.config);

    // Initialize logging
    let log_config = LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
    };
    nemesis::init_tracing(&log_config)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    info!("Starting nemesis collector");
    if let Some(e) = config_error {
        warn!(
            "Configuration file {:?} could not be loaded ({}); using default values",
            args.config, e
        );
    }
    info!(
        "Configuration: data_dir={:?}, interface={}, sys_refresh={}s, net_refresh={}s",
        config.data_dir, config.interface, config.sys_refresh_secs, config.net_refresh_secs
    );

    // Provision the output tree and start the writer loops
    let handles = match supervisor::start(&config) {
        Ok(handles) => handles,
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    // The loops run forever; wait for an external shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    for handle in handles {
        handle.abort();
    }
    info!("Collector stopped");

    Ok(())
}
