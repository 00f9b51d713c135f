//! Freight Matrix CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Command-line front end for validating and exporting freight-matrix
//! files (SKU, postcode, price).
//!
//! # Overview
//!
//! - **Preview**: validate a file or pasted text and show the first records (`freight preview`)
//! - **Export**: write valid records as batched CSV/JSON files (`freight export`)
//! - **Stats**: summary counts and price figures (`freight stats`)
//! - **Configuration**: persisted export and batch settings (`freight config`)

pub mod commands;
pub mod config;
pub mod error;
pub mod opener;
pub mod report;

// Re-export commonly used types
pub use config::{JsonFileStore, Settings, SettingsStore};
pub use error::{CliError, Result};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Freight Matrix - validate and export SKU/postcode/price files
#[derive(Parser, Debug)]
#[command(name = "freight")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long, env = "FREIGHT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Print the command reference as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate input and show a preview with statistics and errors
    Preview {
        #[command(flatten)]
        input: InputArgs,

        /// Number of records to show
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Validate input and export the valid records
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        options: ExportArgs,
    },

    /// Validate input and print summary statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Where records are read from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input file (.csv or .json)
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read pasted CSV text from standard input
    #[arg(long)]
    pub stdin: bool,
}

/// Per-run overrides of the stored export settings
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output folder
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write CSV files
    #[arg(long, conflicts_with = "no_csv")]
    pub csv: bool,

    /// Do not write CSV files
    #[arg(long)]
    pub no_csv: bool,

    /// Write JSON files
    #[arg(long, conflicts_with = "no_json")]
    pub json: bool,

    /// Do not write JSON files
    #[arg(long)]
    pub no_json: bool,

    /// Write everything to a single file per format
    #[arg(long, conflicts_with_all = ["rows", "group"])]
    pub no_batch: bool,

    /// Split into files of at most N records
    #[arg(long, value_name = "N", conflicts_with = "group")]
    pub rows: Option<usize>,

    /// Write one file per value of this column
    #[arg(long, value_name = "COLUMN")]
    pub group: Option<String>,

    /// Filename pattern using {base} {batch} {group} {ts} {ext}
    #[arg(long)]
    pub pattern: Option<String>,

    /// Do not open the output folder afterwards
    #[arg(long)]
    pub no_open: bool,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get a setting by dotted key (e.g. batch.mode)
    Get {
        /// Setting key
        key: String,
    },

    /// Set a setting by dotted key
    Set {
        /// Setting key
        key: String,

        /// New value
        value: String,
    },

    /// Show all settings
    Show,

    /// Restore default settings
    Reset,
}
