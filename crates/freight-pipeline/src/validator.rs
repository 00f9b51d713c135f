//! Row validation state machine
//!
//! Source adapters turn their input into a sequence of [`RowItem`]s. The
//! [`RecordValidator`] consumes them in order, applies the field rules,
//! drops duplicates and accumulates the [`ValidationResult`].

use crate::fields::RawFields;
use crate::normalize::{normalize_price, validate_postcode, validate_sku};
use freight_common::types::{Record, ValidationError, ValidationResult};
use std::collections::HashSet;
use tracing::trace;

/// Error text for a repeated `sku|postCode` key
pub const DUPLICATE_ERROR: &str = "Duplicate id within file";

/// One unit of input produced by a source adapter
#[derive(Debug, Clone, PartialEq)]
pub enum RowItem {
    /// A row whose fields were resolved, with its 1-based report position
    Fields { row: usize, fields: RawFields },

    /// A row the adapter could not turn into fields (e.g. malformed JSON)
    Rejected(ValidationError),
}

impl RowItem {
    pub fn fields(row: usize, fields: RawFields) -> Self {
        RowItem::Fields { row, fields }
    }

    pub fn rejected(row: usize, context: impl Into<String>, error: impl Into<String>) -> Self {
        RowItem::Rejected(ValidationError::new(row, context, error))
    }
}

/// Accumulates records, errors and warnings for a single validation run.
#[derive(Debug, Default)]
pub struct RecordValidator {
    seen: HashSet<String>,
    result: ValidationResult,
}

impl RecordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-fatal notice
    pub fn warn(&mut self, message: impl Into<String>) {
        self.result.warnings.push(message.into());
    }

    /// Process one adapter item
    pub fn push(&mut self, item: RowItem) {
        match item {
            RowItem::Fields { row, fields } => self.push_fields(row, fields),
            RowItem::Rejected(error) => self.result.errors.push(error),
        }
    }

    /// Validate one resolved row.
    ///
    /// Blank rows are skipped. A row is either appended to `records` or
    /// reported once in `errors`, never both.
    pub fn push_fields(&mut self, row: usize, fields: RawFields) {
        if fields.is_blank() {
            trace!(row, "Skipping blank row");
            return;
        }

        let sku_check = validate_sku(&fields.sku);
        let post_code_check = validate_postcode(&fields.post_code);
        let price_check = normalize_price(&fields.price);

        let mut reasons: Vec<&str> = Vec::new();
        if fields.sku.is_empty() {
            reasons.push("sku missing");
        }
        if fields.post_code.is_empty() {
            reasons.push("postCode missing");
        }
        if fields.price.is_empty() {
            reasons.push("price missing");
        }
        if let (false, Err(reason)) = (fields.sku.is_empty(), sku_check) {
            reasons.push(reason);
        }
        if let (false, Err(reason)) = (fields.post_code.is_empty(), post_code_check) {
            reasons.push(reason);
        }
        if let (false, Err(reason)) = (fields.price.is_empty(), price_check) {
            reasons.push(reason);
        }

        if !reasons.is_empty() {
            self.result
                .errors
                .push(ValidationError::new(row, fields.context(), reasons.join("; ")));
            return;
        }

        // Every check passed, so the price parse cannot fail here.
        let Ok(price) = price_check else {
            return;
        };

        let record = Record::new(fields.sku, fields.post_code, price);
        if !self.seen.insert(record.identity_key()) {
            self.result.errors.push(ValidationError::new(
                row,
                format!("sku={}, postCode={}", record.sku, record.post_code),
                DUPLICATE_ERROR,
            ));
            return;
        }

        self.result.records.push(record);
    }

    pub fn finish(self) -> ValidationResult {
        self.result
    }
}

/// Drive a validator over a sequence of items
pub fn validate_items<I>(items: I) -> ValidationResult
where
    I: IntoIterator<Item = RowItem>,
{
    let mut validator = RecordValidator::new();
    for item in items {
        validator.push(item);
    }
    validator.finish()
}
