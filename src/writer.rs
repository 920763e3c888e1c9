//! Periodic snapshot writer loop.
//!
//! Each writer owns one sampler, one interval and one output path, and runs
//! for the lifetime of the process. Snapshots are published atomically so a
//! concurrent reader never observes a partially written file.

use crate::error::Result;
use crate::{host, net};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which sampler a writer drives.
#[derive(Debug, Clone)]
pub enum SamplerKind {
    Host,
    Net { interface: String },
}

impl SamplerKind {
    fn name(&self) -> &'static str {
        match self {
            SamplerKind::Host => "host",
            SamplerKind::Net { .. } => "net",
        }
    }
}

/// Configuration for one writer loop, owned by it for its entire lifetime.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub output_path: PathBuf,
    pub interval: Duration,
    pub sampler: SamplerKind,
}

/// A writer loop bound to one sampler and one output file.
pub struct SnapshotWriter {
    config: WriterConfig,
}

impl SnapshotWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Run the write loop. Never returns; a failed cycle is logged and the
    /// next tick proceeds, favoring liveness of future exports.
    pub async fn run(self) {
        info!(
            "Starting {} snapshot writer -> {:?} (interval: {}s)",
            self.config.sampler.name(),
            self.config.output_path,
            self.config.interval.as_secs()
        );

        loop {
            match self.write_once().await {
                Ok(()) => {
                    debug!("Written JSON data to {:?}", self.config.output_path);
                }
                Err(e) => {
                    warn!(
                        "Failed to write snapshot to {:?}: {} (retrying next tick)",
                        self.config.output_path, e
                    );
                }
            }

            tokio::time::sleep(self.config.interval).await;
        }
    }

    /// One cycle: sample, serialize, publish atomically.
    async fn write_once(&self) -> Result<()> {
        let payload = match &self.config.sampler {
            SamplerKind::Host => serde_json::to_vec(&host::sample().await)?,
            SamplerKind::Net { interface } => serde_json::to_vec(&net::sample(interface))?,
        };

        write_atomic(&self.config.output_path, &payload)?;
        Ok(())
    }
}

/// Replace the content of `path` with `data` atomically.
///
/// Writes to a `.tmp` sibling, flushes it fully, then renames over the final
/// path. Readers see either the previous content or the new content, never a
/// partial file.
pub fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)
}
