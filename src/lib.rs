//! Nemesis host telemetry collector.
//!
//! Periodically samples host resource usage and the link state of one
//! network interface, and publishes each domain as a flat JSON snapshot
//! file on its own refresh interval:
//!
//! ```text
//! <data_dir>/nemesis_data/json/ipv4/host.json
//! <data_dir>/nemesis_data/json/ipv4/net.json
//! ```
//!
//! - [`link`] - link-state inference from raw `/sys/class/net` signals
//! - [`host`] - host resource sampling (CPU, RAM, swap, uptime)
//! - [`net`] - per-interface sampling (addresses + link state)
//! - [`writer`] - periodic atomic snapshot writer loops
//! - [`supervisor`] - provisioning and writer loop startup
//! - [`config`] - configuration loading (JSON5 format)
//! - [`error`] - error types

pub mod config;
pub mod error;
pub mod host;
pub mod link;
pub mod net;
pub mod supervisor;
pub mod writer;

pub use config::{CollectorConfig, LoggingConfig};
pub use error::{Error, Result, StartupError};

/// Initialize tracing with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}
