use std::path::PathBuf;
use thiserror::Error;

/// Common error type for collector components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the collector's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal startup failures.
///
/// These abort the process before any writer loop starts; there is no safe
/// default output location to degrade to.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Data directory '{0}' does not exist")]
    MissingRoot(PathBuf),

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to provision run directory: {0}")]
    Provision(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StartupError {
    /// Process exit code for this failure: 1 for a permission problem,
    /// 2 for a missing or invalid output root.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::Provision(e) if e.kind() == std::io::ErrorKind::PermissionDenied => 1,
            _ => 2,
        }
    }
}
