//! CSV and JSON file writers

use crate::normalize::price_to_string;
use freight_common::types::{Record, ValidationError};
use freight_common::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of exported CSV files
pub const CSV_HEADER: [&str; 3] = ["postCode", "sku", "price"];

/// Column order of the errors file
pub const ERRORS_HEADER: [&str; 3] = ["row", "context", "error"];

/// Write records as CSV.
///
/// Postcodes lose their leading zeros in this format only.
pub fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            csv_post_code(&record.post_code),
            record.sku.as_str(),
            price_to_string(record.price).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as a JSON array pretty-printed with a 4-space indent
pub fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut serializer)?;
    out.flush()?;
    Ok(())
}

/// Write the `row,context,error` file
pub fn write_errors(path: &Path, errors: &[ValidationError]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ERRORS_HEADER)?;
    for error in errors {
        writer.write_record([
            error.row.to_string().as_str(),
            error.context.as_str(),
            error.error.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_post_code(post_code: &str) -> &str {
    post_code.trim_start_matches('0')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Record> {
        vec![Record::new("A1", "0800", 20.0), Record::new("B,2", "2000", 19.99)]
    }

    #[test]
    fn test_write_csv_strips_leading_zeros() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &sample()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "postCode,sku,price\n800,A1,20.0\n2000,\"B,2\",19.99\n");
    }

    #[test]
    fn test_write_json_keeps_postcode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &sample()[..1]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[\n    {\n        \"postCode\": \"0800\",\n        \"sku\": \"A1\",\n        \"price\": 20.0\n    }\n]"
        );
    }

    #[test]
    fn test_write_json_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        write_json(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rates_errors.csv");
        let errors = vec![
            ValidationError::header("Missing required columns: price"),
            ValidationError::new(3, "sku=A1, postCode=204", "postCode must be 4 digits"),
        ];
        write_errors(&path, &errors).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "row,context,error\n1,header,Missing required columns: price\n3,\"sku=A1, postCode=204\",postCode must be 4 digits\n"
        );
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        assert!(write_csv(&path, &sample()).is_err());
    }
}
