//! Export of validated records
//!
//! Records are partitioned into batches, each batch is written as CSV
//! and/or JSON under a templated file name, and validation errors go to a
//! sibling `<base>_errors.csv`.
//!
//! Writes are not transactional. A failed file is recorded in the
//! [`ExportReport`] and the remaining files are still attempted.

pub mod partition;
pub mod path;
pub mod writer;

pub use partition::{partition, ExportBatch, Partitioning};
pub use path::{render_path, PathVars, DEFAULT_FILENAME_PATTERN};

use freight_common::{FreightError, Result, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Rows per file used when the configured value cannot be parsed
pub const DEFAULT_ROWS_PER_FILE: usize = 1000;

/// Timestamp format used in file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Batch splitting strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    #[default]
    Rows,
    Group,
}

impl std::str::FromStr for BatchMode {
    type Err = FreightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rows" => Ok(BatchMode::Rows),
            "group" => Ok(BatchMode::Group),
            _ => Err(FreightError::config(format!(
                "Invalid batch mode: {}. Valid modes: rows, group",
                s
            ))),
        }
    }
}

impl std::fmt::Display for BatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchMode::Rows => f.write_str("rows"),
            BatchMode::Group => f.write_str("group"),
        }
    }
}

/// Batching options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub enabled: bool,
    pub mode: BatchMode,
    pub rows_per_file: usize,
    pub group_column: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: BatchMode::Rows,
            rows_per_file: DEFAULT_ROWS_PER_FILE,
            group_column: "postcode".to_string(),
        }
    }
}

impl BatchOptions {
    pub fn partitioning(&self) -> Partitioning {
        if !self.enabled {
            return Partitioning::Single;
        }
        match self.mode {
            BatchMode::Rows => Partitioning::Rows(self.rows_per_file.max(1)),
            BatchMode::Group => Partitioning::Group(self.group_column.trim().to_string()),
        }
    }
}

/// Everything an export needs, passed explicitly by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Destination folder, created if missing
    pub folder: PathBuf,
    pub write_csv: bool,
    pub write_json: bool,
    pub filename_pattern: String,
    pub batch: BatchOptions,
}

impl ExportOptions {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            write_csv: false,
            write_json: true,
            filename_pattern: DEFAULT_FILENAME_PATTERN.to_string(),
            batch: BatchOptions::default(),
        }
    }

    /// Path of the errors file for `base`
    pub fn errors_path(&self, base: &str) -> PathBuf {
        self.folder.join(format!("{}_errors.csv", base))
    }
}

/// A file that could not be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of an export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Batch files written, in write order
    pub written: Vec<PathBuf>,

    /// Errors file, when validation errors were present and it was written
    pub errors_file: Option<PathBuf>,

    /// Files that failed to write
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: PathBuf, outcome: Result<()>) -> bool {
        match outcome {
            Ok(()) => {
                info!(path = %path.display(), "Wrote export file");
                true
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to write export file");
                self.failures.push(ExportFailure {
                    path,
                    error: e.to_string(),
                });
                false
            },
        }
    }
}

/// Current local time in the file name timestamp format
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Export a validation result.
///
/// Refuses with [`FreightError::NothingToExport`] when every row was
/// invalid. Per-file write failures do not abort the export.
#[instrument(skip(result, options), fields(folder = %options.folder.display()))]
pub fn export(
    result: &ValidationResult,
    options: &ExportOptions,
    base: &str,
    ts: &str,
) -> Result<ExportReport> {
    if !result.has_records() && result.has_errors() {
        return Err(FreightError::NothingToExport);
    }

    std::fs::create_dir_all(&options.folder)?;

    let batches = partition(&result.records, &options.batch.partitioning());
    let mut report = ExportReport::default();

    for batch in &batches {
        if options.write_csv {
            let path = batch_path(options, base, batch, ts, "csv");
            let outcome = writer::write_csv(&path, &batch.records);
            if report.record(path.clone(), outcome) {
                report.written.push(path);
            }
        }
        if options.write_json {
            let path = batch_path(options, base, batch, ts, "json");
            let outcome = writer::write_json(&path, &batch.records);
            if report.record(path.clone(), outcome) {
                report.written.push(path);
            }
        }
    }

    if result.has_errors() {
        let path = options.errors_path(base);
        let outcome = writer::write_errors(&path, &result.errors);
        if report.record(path.clone(), outcome) {
            report.errors_file = Some(path);
        }
    }

    info!(
        batches = batches.len(),
        files = report.written.len(),
        failures = report.failures.len(),
        "Export finished"
    );
    Ok(report)
}

fn batch_path(
    options: &ExportOptions,
    base: &str,
    batch: &ExportBatch,
    ts: &str,
    ext: &str,
) -> PathBuf {
    render_path(
        Path::new(&options.folder),
        &options.filename_pattern,
        &PathVars {
            base,
            batch: &batch.batch_label,
            group: &batch.group_label,
            ts,
            ext,
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use freight_common::types::{Record, ValidationError};
    use tempfile::TempDir;

    const TS: &str = "20240102_030405";

    fn result_with(records: Vec<Record>, errors: Vec<ValidationError>) -> ValidationResult {
        ValidationResult {
            records,
            errors,
            warnings: Vec::new(),
        }
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_batch_mode_from_str() {
        assert_eq!("rows".parse::<BatchMode>().unwrap(), BatchMode::Rows);
        assert_eq!(" GROUP ".parse::<BatchMode>().unwrap(), BatchMode::Group);
        assert!("pages".parse::<BatchMode>().is_err());
    }

    #[test]
    fn test_partitioning_from_options() {
        let mut batch = BatchOptions::default();
        assert_eq!(batch.partitioning(), Partitioning::Single);

        batch.enabled = true;
        batch.rows_per_file = 0;
        assert_eq!(batch.partitioning(), Partitioning::Rows(1));

        batch.mode = BatchMode::Group;
        batch.group_column = " sku ".to_string();
        assert_eq!(batch.partitioning(), Partitioning::Group("sku".to_string()));
    }

    #[test]
    fn test_single_export_writes_both_formats() {
        let dir = TempDir::new().unwrap();
        let mut options = ExportOptions::new(dir.path().join("out"));
        options.write_csv = true;

        let result = result_with(vec![Record::new("A1", "2000", 1.0)], vec![]);
        let report = export(&result, &options, "rates", TS).unwrap();

        assert_eq!(
            names(&report.written),
            vec![
                "rates_all_all_20240102_030405.csv",
                "rates_all_all_20240102_030405.json"
            ]
        );
        assert!(report.errors_file.is_none());
        assert!(report.is_complete());
    }

    #[test]
    fn test_rows_export_and_errors_file() {
        let dir = TempDir::new().unwrap();
        let mut options = ExportOptions::new(dir.path());
        options.batch = BatchOptions {
            enabled: true,
            mode: BatchMode::Rows,
            rows_per_file: 2,
            group_column: String::new(),
        };

        let records = (0..5)
            .map(|i| Record::new(format!("S{}", i), "2000", i as f64))
            .collect();
        let errors = vec![ValidationError::new(9, "sku=X, postCode=1", "postCode must be 4 digits")];
        let report = export(&result_with(records, errors), &options, "rates", TS).unwrap();

        assert_eq!(
            names(&report.written),
            vec![
                "rates_part001_all_20240102_030405.json",
                "rates_part002_all_20240102_030405.json",
                "rates_part003_all_20240102_030405.json"
            ]
        );
        let errors_file = report.errors_file.unwrap();
        assert_eq!(errors_file, dir.path().join("rates_errors.csv"));
        assert!(std::fs::read_to_string(errors_file)
            .unwrap()
            .starts_with("row,context,error\n9,"));
    }

    #[test]
    fn test_group_export_uses_sanitized_labels() {
        let dir = TempDir::new().unwrap();
        let mut options = ExportOptions::new(dir.path());
        options.filename_pattern = "{base}-{group}.{ext}".to_string();
        options.batch.enabled = true;
        options.batch.mode = BatchMode::Group;
        options.batch.group_column = "sku".to_string();

        let records = vec![
            Record::new("A/1", "2000", 1.0),
            Record::new("B.2", "2000", 2.0),
            Record::new("A/1", "3000", 3.0),
        ];
        let report = export(&result_with(records, vec![]), &options, "pasted", TS).unwrap();

        assert_eq!(names(&report.written), vec!["pasted-A_1.json", "pasted-B.2.json"]);
        let grouped: Vec<Record> =
            serde_json::from_str(&std::fs::read_to_string(&report.written[0]).unwrap()).unwrap();
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn test_all_invalid_refuses_export() {
        let dir = TempDir::new().unwrap();
        let options = ExportOptions::new(dir.path());
        let result = result_with(vec![], vec![ValidationError::header("Missing header row")]);

        assert!(matches!(
            export(&result, &options, "rates", TS),
            Err(FreightError::NothingToExport)
        ));
    }

    #[test]
    fn test_rows_export_with_no_records_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut options = ExportOptions::new(dir.path());
        options.batch.enabled = true;

        let report = export(&ValidationResult::new(), &options, "rates", TS).unwrap();
        assert!(report.written.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn test_write_failure_is_reported_and_export_continues() {
        let dir = TempDir::new().unwrap();
        let mut options = ExportOptions::new(dir.path());
        options.write_csv = true;
        // A directory squatting on the CSV path makes that write fail.
        std::fs::create_dir(dir.path().join("rates_all_all_20240102_030405.csv")).unwrap();

        let result = result_with(vec![Record::new("A1", "2000", 1.0)], vec![]);
        let report = export(&result, &options, "rates", TS).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(names(&report.written), vec!["rates_all_all_20240102_030405.json"]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "_");
    }
}
