//! `freight stats` command implementation

use crate::error::Result;
use crate::report::render_stats_table;
use crate::InputArgs;
use freight_pipeline::Stats;

/// Validate the input and print its statistics
pub fn run(input: &InputArgs, json: bool) -> Result<()> {
    let source = super::read_source(input)?;
    let result = super::validate(&source)?;
    let stats = Stats::from_result(&result);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", render_stats_table(&stats));
    }

    Ok(())
}
