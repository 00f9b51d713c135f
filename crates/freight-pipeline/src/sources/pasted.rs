//! Pasted CSV text adapter

use super::csv_source::validate_csv_str;
use freight_common::types::{ValidationError, ValidationResult};
use tracing::debug;

/// Validate pasted CSV text.
///
/// Blank lines are dropped first, so row numbers follow the remaining
/// lines (the header is row 1).
pub fn validate_pasted_text(text: &str) -> ValidationResult {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        return ValidationResult::from_error(ValidationError::header("No content"));
    }

    debug!(lines = lines.len(), "Validating pasted text");
    validate_csv_str(&lines.join("\n"))
}
