//! Console rendering of validation results, statistics and exports
//!
//! Renderers return strings so commands decide where output goes.

use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use freight_common::types::{Record, ValidationError};
use freight_pipeline::normalize::price_to_string;
use freight_pipeline::{ExportReport, Stats};
use std::fmt::Write;

/// Records shown by `preview` unless overridden
pub const DEFAULT_PREVIEW_ROWS: usize = 100;

/// Errors listed under a preview
pub const MAX_LISTED_ERRORS: usize = 50;

/// Format a count with thousands separators (`1234567` -> `1,234,567`)
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{:.2}", p))
}

/// One preview line per record: `postCode,sku,price,`
pub fn render_records(records: &[Record], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "Preview (first {} of {} valid rows)",
            format_count(records.len().min(limit)),
            format_count(records.len())
        )
        .cyan()
        .bold()
    );
    let _ = writeln!(out, "{}", "postCode,sku,price,".bold());
    for record in records.iter().take(limit) {
        let _ = writeln!(
            out,
            "{},{},{},",
            record.post_code,
            record.sku,
            price_to_string(record.price)
        );
    }
    out
}

/// Indented stats block shown under a preview
pub fn render_stats_block(stats: &Stats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Rows".cyan().bold());
    let _ = writeln!(out, "  Estimated total: {}", format_count(stats.rows_total));
    let _ = writeln!(out, "  Valid:           {}", format_count(stats.rows_valid).green());
    let invalid = format_count(stats.rows_invalid);
    if stats.rows_invalid > 0 {
        let _ = writeln!(out, "  Invalid:         {}", invalid.red());
    } else {
        let _ = writeln!(out, "  Invalid:         {}", invalid);
    }

    let _ = writeln!(out, "{}", "Data quality".cyan().bold());
    let _ = writeln!(out, "  Duplicates:      {}", format_count(stats.duplicates));
    let _ = writeln!(out, "  Unique SKUs:     {}", format_count(stats.unique_skus));

    let _ = writeln!(out, "{}", "Price".cyan().bold());
    let _ = writeln!(out, "  Min:             {}", format_price(stats.price_min));
    let _ = writeln!(out, "  Max:             {}", format_price(stats.price_max));
    let _ = writeln!(out, "  Avg:             {}", format_price(stats.price_avg));
    out
}

/// Stats as a two-column table
pub fn render_stats_table(stats: &Stats) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Metric", "Value"]);

    table.add_row(vec!["Rows total".to_string(), format_count(stats.rows_total)]);
    table.add_row(vec!["Rows valid".to_string(), format_count(stats.rows_valid)]);
    table.add_row(vec!["Rows invalid".to_string(), format_count(stats.rows_invalid)]);
    table.add_row(vec!["Duplicates".to_string(), format_count(stats.duplicates)]);
    table.add_row(vec!["Unique SKUs".to_string(), format_count(stats.unique_skus)]);
    table.add_row(vec!["Price min".to_string(), format_price(stats.price_min)]);
    table.add_row(vec!["Price max".to_string(), format_price(stats.price_max)]);
    table.add_row(vec!["Price avg".to_string(), format_price(stats.price_avg)]);
    table.add_row(vec!["Warnings".to_string(), format_count(stats.warnings_count)]);

    table.to_string()
}

/// Warning list, empty when there are none
pub fn render_warnings(warnings: &[String]) -> String {
    let mut out = String::new();
    if warnings.is_empty() {
        return out;
    }
    let _ = writeln!(out, "{}", format!("Warnings ({})", warnings.len()).yellow().bold());
    for warning in warnings {
        let _ = writeln!(out, "  - {}", warning);
    }
    out
}

/// The first `max` errors as `Row N: context - error`
pub fn render_errors(errors: &[ValidationError], max: usize) -> String {
    let mut out = String::new();
    if errors.is_empty() {
        return out;
    }
    let _ = writeln!(
        out,
        "{}",
        format!(
            "Errors (showing {} of {})",
            format_count(errors.len().min(max)),
            format_count(errors.len())
        )
        .red()
        .bold()
    );
    for error in errors.iter().take(max) {
        let _ = writeln!(out, "  Row {}: {} - {}", error.row, error.context, error.error);
    }
    out
}

/// Files written by an export, plus any that failed
pub fn render_export(report: &ExportReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Exported {} file(s)",
        "✓".green(),
        format_count(report.written.len())
    );
    for path in &report.written {
        let _ = writeln!(out, "  {}", path.display());
    }
    if let Some(ref errors_file) = report.errors_file {
        let _ = writeln!(out, "{} Errors written to {}", "!".yellow(), errors_file.display());
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "{} Failed to write {}: {}",
            "✗".red(),
            failure.path.display(),
            failure.error
        );
    }
    out
}
