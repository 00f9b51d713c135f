//! Error types for the freight CLI
//!
//! Messages are shown to the user as-is, so each one says what went wrong
//! and what to try next.

use freight_common::FreightError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Neither a file nor pasted text was given
    #[error("No file selected or pasted content. Pass a .csv or .json file, or pipe CSV text with --stdin.")]
    NoInput,

    /// Validation or export failed as a whole
    #[error("{0}")]
    Pipeline(#[from] FreightError),

    /// Some export files could not be written
    #[error("Export incomplete: {0} file(s) could not be written. Check folder permissions and disk space.")]
    ExportIncomplete(usize),

    /// Settings are missing or invalid
    #[error("Configuration error: {0}. Run 'freight config show' to see the available keys.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Failed to parse JSON: {0}. Check the file syntax.")]
    JsonParse(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
