//! `freight preview` command implementation
//!
//! Shows the first valid records, statistics, warnings and errors.

use crate::error::Result;
use crate::report::{
    render_errors, render_records, render_stats_block, render_warnings, MAX_LISTED_ERRORS,
};
use crate::InputArgs;
use freight_common::ValidationResult;
use freight_pipeline::Stats;

/// Validate the input and print the preview
pub fn run(input: &InputArgs, limit: usize) -> Result<()> {
    let source = super::read_source(input)?;
    let result = super::validate(&source)?;
    print!("{}", render(&result, limit));
    Ok(())
}

/// Full preview text for a validation result
pub fn render(result: &ValidationResult, limit: usize) -> String {
    [
        render_records(&result.records, limit),
        render_stats_block(&Stats::from_result(result)),
        render_warnings(&result.warnings),
        render_errors(&result.errors, MAX_LISTED_ERRORS),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use freight_pipeline::sources::validate_pasted_text;

    #[test]
    fn test_render_preview() {
        colored::control::set_override(false);
        let result = validate_pasted_text(
            "SKU,PostCode,Price\nABC-123,2000,$19.99\nABC-123,2000,5\nBAD SKU,20,x\n",
        );
        let out = render(&result, 100);

        assert!(out.contains("2000,ABC-123,19.99,\n"));
        assert!(out.contains("Estimated total: 3"));
        assert!(out.contains("Row 3: sku=ABC-123, postCode=2000 - Duplicate id within file"));
        assert!(out.contains("Row 4: "));
        assert!(!out.contains("Warnings"));
    }
}
