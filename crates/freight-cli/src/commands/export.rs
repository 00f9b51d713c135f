//! `freight export` command implementation
//!
//! Validates the input, then writes the valid records using the stored
//! settings with command-line overrides applied for this run only.

use crate::config::{Settings, SettingsStore};
use crate::error::{CliError, Result};
use crate::opener::FolderOpener;
use crate::report::{format_count, render_export, render_warnings};
use crate::{ExportArgs, InputArgs};
use colored::Colorize;
use freight_pipeline::export::{self, BatchMode};
use freight_pipeline::{ExportReport, InputSource};
use tracing::{debug, warn};

/// Validate and export
pub fn run(
    input: &InputArgs,
    args: &ExportArgs,
    store: &dyn SettingsStore,
    opener: &dyn FolderOpener,
) -> Result<()> {
    let source = super::read_source(input)?;
    export_source(&source, args, store, opener)?;
    Ok(())
}

/// Export an already resolved source
pub fn export_source(
    source: &InputSource,
    args: &ExportArgs,
    store: &dyn SettingsStore,
    opener: &dyn FolderOpener,
) -> Result<ExportReport> {
    let mut settings = store.load();
    apply_overrides(&mut settings, args);

    if !settings.export.formats.csv && !settings.export.formats.json {
        warn!("No output format selected; only the errors file can be written");
    }

    let result = super::validate(source)?;
    println!(
        "Validated {} valid and {} invalid row(s)",
        format_count(result.records.len()).green(),
        format_count(result.errors.len())
    );
    print!("{}", render_warnings(&result.warnings));

    let options = settings.to_export_options();
    let report = export::export(&result, &options, &source.base_name(), &export::timestamp())?;
    print!("{}", render_export(&report));

    if !report.is_complete() {
        return Err(CliError::ExportIncomplete(report.failures.len()));
    }

    if settings.export.open_folder_after && !args.no_open {
        if let Err(e) = opener.open(&options.folder) {
            debug!(folder = %options.folder.display(), error = %e, "Could not open export folder");
        }
    }

    Ok(report)
}

/// Apply per-run flags on top of stored settings
pub fn apply_overrides(settings: &mut Settings, args: &ExportArgs) {
    if let Some(ref out) = args.out {
        settings.export.folder = out.clone();
    }
    if args.csv {
        settings.export.formats.csv = true;
    }
    if args.no_csv {
        settings.export.formats.csv = false;
    }
    if args.json {
        settings.export.formats.json = true;
    }
    if args.no_json {
        settings.export.formats.json = false;
    }
    if let Some(ref pattern) = args.pattern {
        settings.export.filename_pattern = pattern.clone();
    }

    if args.no_batch {
        settings.batch.enabled = false;
    }
    if let Some(rows) = args.rows {
        settings.batch.enabled = true;
        settings.batch.mode = BatchMode::Rows;
        settings.batch.rows_per_file = rows.max(1);
    }
    if let Some(ref column) = args.group {
        settings.batch.enabled = true;
        settings.batch.mode = BatchMode::Group;
        settings.batch.group_column = column.clone();
    }
}
