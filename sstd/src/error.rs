use consensus_core::errors::ParamsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("Failed to serialize parameters: {0}")]
    Json(#[from] serde_json::Error),
}

impl DaemonError {
    /// Process exit code: 2 for configuration defects, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            DaemonError::Params(err) if err.is_fatal() => 2,
            DaemonError::ConfigRead { .. } | DaemonError::ConfigParse(_) => 2,
            _ => 1,
        }
    }
}
