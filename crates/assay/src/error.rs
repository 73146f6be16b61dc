//! Error types for the Assay library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Assay operations.
///
/// Every variant except `Config` is a load failure: the table could not be
/// produced, so no metric is computed for it.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no columns to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssayError {
    /// Whether this error means the input table could not be loaded.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            AssayError::Io { .. }
                | AssayError::Csv(_)
                | AssayError::UnsupportedFormat(_)
                | AssayError::EmptyData(_)
        )
    }
}

/// Result type alias for Assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
