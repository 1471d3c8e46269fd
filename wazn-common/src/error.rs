//! Common error types for wazn

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for wazn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the wazn crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus dataset is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file is not valid TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus dataset file does not exist
    #[error("Corpus dataset not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    /// Corpus dataset parsed but has the wrong shape
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),
}
