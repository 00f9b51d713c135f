//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod config;
pub mod export;
pub mod preview;
pub mod stats;

use crate::error::{CliError, Result};
use crate::InputArgs;
use freight_common::ValidationResult;
use freight_pipeline::InputSource;
use std::io::Read;
use tracing::info;

/// Resolve the input arguments, reading pasted text from standard input
/// when `--stdin` is set
pub fn read_source(input: &InputArgs) -> Result<InputSource> {
    source_from(input, std::io::stdin().lock())
}

fn source_from(input: &InputArgs, mut stdin: impl Read) -> Result<InputSource> {
    if input.stdin {
        let mut text = String::new();
        stdin.read_to_string(&mut text)?;
        if text.trim().is_empty() {
            return Err(CliError::NoInput);
        }
        return Ok(InputSource::Pasted(text));
    }

    match input.file {
        Some(ref path) => Ok(InputSource::File(path.clone())),
        None => Err(CliError::NoInput),
    }
}

/// Validate a source and log the outcome
pub fn validate(source: &InputSource) -> Result<ValidationResult> {
    let result = source.validate()?;
    info!(
        valid = result.records.len(),
        invalid = result.errors.len(),
        warnings = result.warnings.len(),
        "Validation finished"
    );
    Ok(result)
}
