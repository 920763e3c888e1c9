//! Collector supervisor: provisions output locations and starts the writer
//! loops.

use crate::config::CollectorConfig;
use crate::error::StartupError;
use crate::writer::{SamplerKind, SnapshotWriter, WriterConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Name of the run directory created under the configured data directory.
const RUN_DIR: &str = "nemesis_data";

/// Provisioned output directories for one run.
#[derive(Debug, Clone)]
pub struct DataDirs {
    pub ipv4: PathBuf,
    /// Reserved for a future IPv6 sampler; downstream consumers expect the
    /// path to exist even though nothing is written there yet.
    pub ipv6: PathBuf,
}

/// Destructively recreate the run directory tree under `data_dir`.
///
/// Any stale run directory (or a plain file squatting on its name) from a
/// previous run is removed first. The data directory itself must already
/// exist; there is no safe default location to fall back to.
pub fn provision(data_dir: &Path) -> Result<DataDirs, StartupError> {
    if !data_dir.exists() {
        return Err(StartupError::MissingRoot(data_dir.to_path_buf()));
    }
    if !data_dir.is_dir() {
        return Err(StartupError::NotADirectory(data_dir.to_path_buf()));
    }

    let run_dir = data_dir.join(RUN_DIR);
    if run_dir.exists() {
        if run_dir.is_file() {
            fs::remove_file(&run_dir)?;
        } else {
            fs::remove_dir_all(&run_dir)?;
        }
        debug!("Removed stale run directory {:?}", run_dir);
    }

    let dirs = DataDirs {
        ipv4: run_dir.join("json").join("ipv4"),
        ipv6: run_dir.join("json").join("ipv6"),
    };
    fs::create_dir_all(&dirs.ipv4)?;
    fs::create_dir_all(&dirs.ipv6)?;
    debug!("Provisioned run directory {:?}", run_dir);

    Ok(dirs)
}

/// Validate the configuration, provision the output tree, and spawn one
/// writer loop per sampling domain.
///
/// Returns the spawned task handles without awaiting them; the loops run
/// until the process is torn down.
pub fn start(config: &CollectorConfig) -> Result<Vec<JoinHandle<()>>, StartupError> {
    config
        .validate()
        .map_err(|e| StartupError::Config(e.to_string()))?;

    let dirs = provision(&config.data_dir)?;

    let writers = [
        WriterConfig {
            output_path: dirs.ipv4.join("host.json"),
            interval: Duration::from_secs(config.sys_refresh_secs),
            sampler: SamplerKind::Host,
        },
        WriterConfig {
            output_path: dirs.ipv4.join("net.json"),
            interval: Duration::from_secs(config.net_refresh_secs),
            sampler: SamplerKind::Net {
                interface: config.interface.clone(),
            },
        },
    ];

    let mut handles = Vec::with_capacity(writers.len());
    for writer_config in writers {
        let writer = SnapshotWriter::new(writer_config);
        handles.push(tokio::spawn(async move {
            writer.run().await;
        }));
    }

    info!("Collector running with {} writer loop(s)", handles.len());
    Ok(handles)
}
