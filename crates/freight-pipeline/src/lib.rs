//! Freight Matrix Pipeline
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Validation, normalization and export of freight-matrix records
//! (SKU, postcode, price).
//!
//! # Stages
//!
//! - [`fields`]: header alias resolution into a fixed set of raw fields
//! - [`normalize`]: per-field parsing and validation rules
//! - [`validator`]: row state machine with deduplication
//! - [`sources`]: CSV file, JSON/NDJSON file and pasted-text adapters
//! - [`export`]: batching, path templating and file writers
//! - [`stats`]: summary statistics over a validation result
//!
//! # Example
//!
//! ```
//! use freight_pipeline::sources::validate_pasted_text;
//! use freight_pipeline::stats::Stats;
//!
//! let result = validate_pasted_text("SKU,PostCode,Price\nABC-123, 2000 ,$19.99\n");
//! assert_eq!(result.records.len(), 1);
//! assert_eq!(result.records[0].price, 19.99);
//!
//! let stats = Stats::from_result(&result);
//! assert_eq!(stats.rows_valid, 1);
//! ```

pub mod export;
pub mod fields;
pub mod normalize;
pub mod sources;
pub mod stats;
pub mod validator;

pub use export::{ExportOptions, ExportReport};
pub use sources::InputSource;
pub use stats::Stats;
