//! Lookup table errors

use std::path::PathBuf;

use thiserror::Error;

/// Result type for lookup table loading
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors raised while loading a subject directory or view registry
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level value is not a JSON object
    #[error("{path} must contain a JSON object of code to label")]
    NotAnObject { path: PathBuf },

    /// A label is not a string
    #[error("{path}: label for '{code}' must be a string")]
    InvalidLabel { path: PathBuf, code: String },
}
