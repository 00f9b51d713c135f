//! JSON adapter: array of objects, with a newline-delimited fallback

use super::strip_bom;
use crate::fields::{RawFields, RawRow};
use crate::normalize::json_text;
use crate::validator::{RecordValidator, RowItem};
use freight_common::types::{ValidationError, ValidationResult};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, instrument, warn};

pub const NOT_ARRAY_WARNING: &str = "Top-level JSON is not an array; falling back to NDJSON parser.";
pub const PARSE_FALLBACK_WARNING: &str =
    "JSON is not an array; attempting NDJSON (one JSON object per line).";

/// Validate a JSON file (array of objects or one object per line)
#[instrument(skip_all, fields(path = %path.display()))]
pub fn validate_json_file(path: &Path) -> ValidationResult {
    let text = match std::fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => return read_error(e),
        },
        Err(e) => return read_error(e),
    };

    let result = validate_json_str(&text);
    info!(
        records = result.records.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validated JSON file"
    );
    result
}

/// Validate JSON text.
///
/// A top-level array is validated item by item (`row` = 1-based index).
/// Anything else is re-read as NDJSON (`row` = 1-based line number) with a
/// warning explaining the fallback.
pub fn validate_json_str(text: &str) -> ValidationResult {
    let text = strip_bom(text);
    let mut validator = RecordValidator::new();

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                validator.push(array_item(idx + 1, item));
            }
            return validator.finish();
        },
        Ok(_) => {
            warn!("Top-level JSON is not an array, reading as NDJSON");
            validator.warn(NOT_ARRAY_WARNING);
        },
        Err(e) => {
            warn!(error = %e, "Whole-document JSON parse failed, reading as NDJSON");
            validator.warn(PARSE_FALLBACK_WARNING);
        },
    }

    for item in ndjson_items(text) {
        validator.push(item);
    }
    validator.finish()
}

fn array_item(row: usize, item: &Value) -> RowItem {
    match item {
        Value::Object(obj) => RowItem::fields(row, object_fields(obj)),
        _ => RowItem::rejected(row, "", "Each item must be a JSON object"),
    }
}

fn ndjson_items(text: &str) -> impl Iterator<Item = RowItem> + '_ {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(row, line)| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(obj)) => RowItem::fields(row, object_fields(&obj)),
            Ok(_) => RowItem::rejected(row, "", "Line is not a JSON object"),
            Err(e) => RowItem::rejected(row, "", format!("Invalid JSON: {}", e)),
        })
}

fn object_fields(obj: &Map<String, Value>) -> RawFields {
    let row: RawRow = obj.iter().map(|(k, v)| (k, json_text(v))).collect();
    RawFields::resolve(&row)
}

fn read_error(e: impl std::fmt::Display) -> ValidationResult {
    ValidationResult::from_error(ValidationError::file(
        "",
        format!("Error reading file line-by-line: {}", e),
    ))
}
