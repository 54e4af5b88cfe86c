//! Error types for dataset loading and catalog lookups.

use std::path::PathBuf;

/// Failure to bring the dataset into memory. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dataset must be an array of servers or an object with a 'servers' array")]
    UnsupportedShape,

    #[error("Invalid server record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Lookup failure for a name or a name/version pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("No server found with name: {name}")]
    NotFound { name: String },

    #[error("No server found with name: {name} and version: {version}")]
    VersionNotFound { name: String, version: String },
}
