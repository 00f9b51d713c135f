//! CSV adapter (files and in-memory text)

use super::strip_bom;
use crate::fields::{missing_fields, normalize_key, RawFields, RawRow};
use crate::validator::RecordValidator;
use csv::ReaderBuilder;
use freight_common::types::{ValidationError, ValidationResult};
use std::path::Path;
use tracing::{debug, info, instrument};

/// First data row number; row 1 is the header
const FIRST_DATA_ROW: usize = 2;

/// Validate a UTF-8 CSV file (optional BOM, header row required)
#[instrument(skip_all, fields(path = %path.display()))]
pub fn validate_csv_file(path: &Path) -> ValidationResult {
    let text = match std::fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => return read_error(e),
        },
        Err(e) => return read_error(e),
    };

    let result = validate_csv_str(&text);
    info!(
        records = result.records.len(),
        errors = result.errors.len(),
        "Validated CSV file"
    );
    result
}

/// Validate CSV text with a header row
pub fn validate_csv_str(text: &str) -> ValidationResult {
    validate_reader(strip_bom(text).as_bytes()).unwrap_or_else(|e| read_error(e))
}

fn validate_reader<R: std::io::Read>(reader: R) -> Result<ValidationResult, csv::Error> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(ValidationResult::from_error(ValidationError::header(
            "Missing header row",
        )));
    }

    let header_names: Vec<&str> = headers.iter().collect();
    let missing = missing_fields(&header_names);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
        debug!(missing = ?names, "Header is missing required columns");
        return Ok(ValidationResult::from_error(ValidationError::header(format!(
            "Missing required columns: {}",
            names.join(", ")
        ))));
    }

    let columns: Vec<String> = header_names.iter().map(|h| normalize_key(h)).collect();
    let mut validator = RecordValidator::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // Short rows read as empty cells, extra cells are ignored.
        let row: RawRow = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column, record.get(i).unwrap_or("")))
            .collect();
        validator.push_fields(idx + FIRST_DATA_ROW, RawFields::resolve(&row));
    }

    Ok(validator.finish())
}

fn read_error(e: impl std::fmt::Display) -> ValidationResult {
    ValidationResult::from_error(ValidationError::file("file", format!("Read error: {}", e)))
}
