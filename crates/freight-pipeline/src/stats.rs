//! Summary statistics over a validation result

use crate::normalize::round_to;
use freight_common::types::ValidationResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Substring identifying duplicate errors
const DUPLICATE_MARKER: &str = "Duplicate id";

/// Counts and price figures for one validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub rows_total: usize,
    pub rows_valid: usize,
    pub rows_invalid: usize,
    pub duplicates: usize,
    pub unique_skus: usize,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Mean price rounded to 6 decimal places
    pub price_avg: Option<f64>,
    pub warnings_count: usize,
}

impl Stats {
    pub fn from_result(result: &ValidationResult) -> Self {
        let records = &result.records;
        let prices = || records.iter().map(|r| r.price);

        let (price_min, price_max, price_avg) = if records.is_empty() {
            (None, None, None)
        } else {
            let min = prices().fold(f64::INFINITY, f64::min);
            let max = prices().fold(f64::NEG_INFINITY, f64::max);
            let avg = prices().sum::<f64>() / records.len() as f64;
            (Some(min), Some(max), Some(round_to(avg, 6)))
        };

        Self {
            rows_total: records.len() + result.errors.len(),
            rows_valid: records.len(),
            rows_invalid: result.errors.len(),
            duplicates: result
                .errors
                .iter()
                .filter(|e| e.error.contains(DUPLICATE_MARKER))
                .count(),
            unique_skus: records
                .iter()
                .map(|r| r.sku.as_str())
                .collect::<HashSet<_>>()
                .len(),
            price_min,
            price_max,
            price_avg,
            warnings_count: result.warnings.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::validator::DUPLICATE_ERROR;
    use freight_common::types::{Record, ValidationError};

    #[test]
    fn test_empty_result() {
        let stats = Stats::from_result(&ValidationResult::new());
        assert_eq!(stats.rows_total, 0);
        assert_eq!(stats.price_min, None);
        assert_eq!(stats.price_max, None);
        assert_eq!(stats.price_avg, None);
    }

    #[test]
    fn test_counts_and_prices() {
        let result = ValidationResult {
            records: vec![
                Record::new("A1", "2000", 1.0),
                Record::new("A1", "3000", 2.0),
                Record::new("B1", "2000", 2.5),
            ],
            errors: vec![
                ValidationError::new(5, "sku=A1, postCode=2000", DUPLICATE_ERROR),
                ValidationError::new(6, "sku=, postCode=", "sku missing"),
            ],
            warnings: vec!["fallback".to_string()],
        };

        let stats = Stats::from_result(&result);
        assert_eq!(stats.rows_total, 5);
        assert_eq!(stats.rows_valid, 3);
        assert_eq!(stats.rows_invalid, 2);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.unique_skus, 2);
        assert_eq!(stats.price_min, Some(1.0));
        assert_eq!(stats.price_max, Some(2.5));
        assert_eq!(stats.price_avg, Some(1.833333));
        assert_eq!(stats.warnings_count, 1);
    }
}
