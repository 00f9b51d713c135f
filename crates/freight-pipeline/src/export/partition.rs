//! Splitting records into output batches

use crate::fields::Field;
use crate::normalize::price_to_string;
use freight_common::types::Record;
use std::collections::HashMap;

/// Label used when no batching or grouping applies
pub const ALL_LABEL: &str = "all";

/// Batch label for every group-mode batch
pub const GROUP_BATCH_LABEL: &str = "group";

/// Group label for empty or unresolvable group values
pub const UNKNOWN_GROUP: &str = "UNK";

/// Maximum length of a sanitized group label, in characters
pub const MAX_GROUP_LABEL_LEN: usize = 80;

/// How records are split across output files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partitioning {
    /// One batch with every record
    Single,

    /// Consecutive chunks of at most this many records
    Rows(usize),

    /// One batch per value of the named column
    Group(String),
}

/// One output file's worth of records
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBatch {
    pub batch_label: String,
    pub group_label: String,
    pub records: Vec<Record>,
}

/// Split records in order according to `partitioning`
pub fn partition(records: &[Record], partitioning: &Partitioning) -> Vec<ExportBatch> {
    match partitioning {
        Partitioning::Single => vec![ExportBatch {
            batch_label: ALL_LABEL.to_string(),
            group_label: ALL_LABEL.to_string(),
            records: records.to_vec(),
        }],
        Partitioning::Rows(size) => by_rows(records, *size),
        Partitioning::Group(column) => by_group(records, column),
    }
}

fn by_rows(records: &[Record], size: usize) -> Vec<ExportBatch> {
    records
        .chunks(size.max(1))
        .enumerate()
        .map(|(idx, chunk)| ExportBatch {
            batch_label: format!("part{:03}", idx + 1),
            group_label: ALL_LABEL.to_string(),
            records: chunk.to_vec(),
        })
        .collect()
}

/// Groups are keyed by sanitized label so that each group maps to exactly
/// one output path. Groups keep first-seen order.
fn by_group(records: &[Record], column: &str) -> Vec<ExportBatch> {
    let field = resolve_group_column(column);
    let mut batches: Vec<ExportBatch> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let label = sanitize_group(&group_value(record, field));
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            batches.push(ExportBatch {
                batch_label: GROUP_BATCH_LABEL.to_string(),
                group_label: label,
                records: Vec::new(),
            });
            batches.len() - 1
        });
        batches[slot].records.push(record.clone());
    }

    batches
}

/// Raw group value of a record for the resolved column.
///
/// Columns that do not name a record field yield `UNK`.
pub fn group_value(record: &Record, field: Option<Field>) -> String {
    let value = match field {
        Some(Field::PostCode) => record.post_code.clone(),
        Some(Field::Sku) => record.sku.clone(),
        Some(Field::Price) => price_to_string(record.price),
        None => String::new(),
    };
    let value = value.trim();
    if value.is_empty() {
        UNKNOWN_GROUP.to_string()
    } else {
        value.to_string()
    }
}

/// Replace anything outside `[A-Za-z0-9-_.]` with `_`, truncate to 80
/// characters, and fall back to `UNK` when empty.
pub fn sanitize_group(value: &str) -> String {
    let label: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_GROUP_LABEL_LEN)
        .collect();

    if label.is_empty() {
        UNKNOWN_GROUP.to_string()
    } else {
        label
    }
}

/// Resolve a configured group column name to a record field
pub fn resolve_group_column(column: &str) -> Option<Field> {
    Field::from_alias(column)
}
