use std::path::PathBuf;

use flag_quantize::ParseFlagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagError {
    #[error("Source image unavailable: {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Palette image unavailable: {}: {reason}", path.display())]
    PaletteUnavailable { path: PathBuf, reason: String },

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Failed to save flag: {0}")]
    Persist(#[from] std::io::Error),

    #[error("Invalid flag: {0}")]
    InvalidFlag(#[from] ParseFlagError),

    #[error("Saved flag not found: {0}")]
    FlagNotFound(String),

    #[error("Preview error: {0}")]
    Preview(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Task error: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for FlagError {
    fn from(e: tokio::task::JoinError) -> Self {
        FlagError::Task(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
