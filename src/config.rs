//! Collector configuration (JSON5 format).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete collector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Root directory the run directory is provisioned under.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Network interface to sample.
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Host snapshot refresh interval in seconds.
    #[serde(default = "default_refresh_secs")]
    pub sys_refresh_secs: u64,

    /// Network snapshot refresh interval in seconds.
    #[serde(default = "default_refresh_secs")]
    pub net_refresh_secs: u64,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/etc/nemesis")
}

fn default_interface() -> String {
    "lo".to_string()
}

fn default_refresh_secs() -> u64 {
    30
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            interface: default_interface(),
            sys_refresh_secs: default_refresh_secs(),
            net_refresh_secs: default_refresh_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CollectorConfig {
    /// Load configuration from a JSON5 file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config =
            json5::from_str(&content).map_err(|e| Error::Config(format!("parse error: {}", e)))?;
        Ok(config)
    }

    /// Load configuration, falling back to the documented defaults when the
    /// file is missing or unparseable.
    ///
    /// The load error is returned alongside the defaults so the caller can
    /// log it once tracing is initialized; this runs before the subscriber
    /// exists, so logging here would be discarded.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<Error>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.sys_refresh_secs == 0 {
            return Err(Error::Config("sys_refresh_secs must be >= 1".to_string()));
        }
        if self.net_refresh_secs == 0 {
            return Err(Error::Config("net_refresh_secs must be >= 1".to_string()));
        }
        Ok(())
    }
}
