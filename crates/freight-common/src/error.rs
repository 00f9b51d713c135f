//! Error types for the freight matrix pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, FreightError>;

/// Main error type for the pipeline
///
/// Row-level validation failures are not errors in this sense; they are
/// collected as [`ValidationError`](crate::types::ValidationError) entries.
#[derive(Error, Debug)]
pub enum FreightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No valid rows to export (all invalid)")]
    NothingToExport,
}

impl FreightError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
