//! Source adapters
//!
//! Each adapter turns one kind of input into [`RowItem`](crate::validator::RowItem)s
//! for the shared validator. Adapters never fail a whole run on bad rows;
//! unreadable input becomes a single file-level error entry.

mod csv_source;
mod json_source;
mod pasted;

pub use csv_source::{validate_csv_file, validate_csv_str};
pub use json_source::{validate_json_file, validate_json_str};
pub use pasted::validate_pasted_text;

use freight_common::{FreightError, Result, ValidationResult};
use std::path::{Path, PathBuf};

/// Base name used for exports of pasted text
pub const PASTED_BASE_NAME: &str = "pasted";

const UTF8_BOM: char = '\u{feff}';

/// File formats understood by the adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Json,
}

impl SourceKind {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(SourceKind::Csv),
            "json" => Ok(SourceKind::Json),
            _ => Err(FreightError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Where the records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A `.csv` or `.json` file on disk
    File(PathBuf),

    /// CSV text pasted by the user, header on the first non-blank line
    Pasted(String),
}

impl InputSource {
    /// Validate the input.
    ///
    /// Only an unsupported file extension is an `Err`; read and parse
    /// failures are reported inside the result.
    pub fn validate(&self) -> Result<ValidationResult> {
        match self {
            InputSource::File(path) => match SourceKind::from_path(path)? {
                SourceKind::Csv => Ok(validate_csv_file(path)),
                SourceKind::Json => Ok(validate_json_file(path)),
            },
            InputSource::Pasted(text) => Ok(validate_pasted_text(text)),
        }
    }

    /// Export base name: file stem lower-cased with spaces and hyphens
    /// replaced by underscores, or `pasted`.
    pub fn base_name(&self) -> String {
        let stem = match self {
            InputSource::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| PASTED_BASE_NAME.to_string()),
            InputSource::Pasted(_) => PASTED_BASE_NAME.to_string(),
        };
        stem.to_lowercase().replace(['-', ' '], "_")
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}
