//! Domain types shared by the pipeline and the CLI

use serde::{Deserialize, Serialize};

/// Context value used for header-level validation errors
pub const HEADER_CONTEXT: &str = "header";

/// A validated freight-matrix row.
///
/// Field order matches the exported JSON object layout (`postCode, sku, price`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Four-digit postcode, leading zeros preserved
    #[serde(rename = "postCode")]
    pub post_code: String,

    /// Product code
    pub sku: String,

    /// Unit price, finite, non-negative, rounded to 2 decimal places
    pub price: f64,
}

impl Record {
    pub fn new(sku: impl Into<String>, post_code: impl Into<String>, price: f64) -> Self {
        Self {
            post_code: post_code.into(),
            sku: sku.into(),
            price,
        }
    }

    /// Deduplication key: `sku|postCode`
    pub fn identity_key(&self) -> String {
        identity_key(&self.sku, &self.post_code)
    }
}

/// Build the deduplication key from normalized values
pub fn identity_key(sku: &str, post_code: &str) -> String {
    format!("{}|{}", sku, post_code)
}

/// One rejected row, or a file/header level failure.
///
/// `row` is 1-based; `0` marks a file-level failure and `1` with
/// `context == "header"` marks a header failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub context: String,
    pub error: String,
}

impl ValidationError {
    pub fn new(row: usize, context: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            row,
            context: context.into(),
            error: error.into(),
        }
    }

    /// Header-level error (`row = 1`, `context = "header"`)
    pub fn header(error: impl Into<String>) -> Self {
        Self::new(1, HEADER_CONTEXT, error)
    }

    /// File-level error (`row = 0`)
    pub fn file(context: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(0, context, error)
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Valid records in input order, unique by identity key
    pub records: Vec<Record>,

    /// Rejected rows and file/header failures, in discovery order
    pub errors: Vec<ValidationError>,

    /// Non-fatal notices such as format fallbacks
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result holding a single error and nothing else
    pub fn from_error(error: ValidationError) -> Self {
        Self {
            records: Vec::new(),
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_is_case_sensitive() {
        let a = Record::new("abc", "2000", 1.0);
        let b = Record::new("ABC", "2000", 1.0);
        assert_eq!(a.identity_key(), "abc|2000");
        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_record_json_layout() {
        let record = Record::new("A1", "0800", 10.0);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"postCode":"0800","sku":"A1","price":10.0}"#);
    }

    #[test]
    fn test_error_constructors() {
        let header = ValidationError::header("Missing header row");
        assert_eq!(header.row, 1);
        assert_eq!(header.context, "header");

        let file = ValidationError::file("file", "Read error: boom");
        assert_eq!(file.row, 0);
        assert_eq!(file.context, "file");
    }

    #[test]
    fn test_result_from_error() {
        let result = ValidationResult::from_error(ValidationError::header("No content"));
        assert!(!result.has_records());
        assert!(result.has_errors());
        assert!(result.warnings.is_empty());
    }
}
