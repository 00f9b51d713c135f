//! Freight Matrix Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling and logging for the freight matrix workspace.
//!
//! # Overview
//!
//! - **Types**: the canonical [`Record`](types::Record) and the validation result shapes
//! - **Error Handling**: [`FreightError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```
//! use freight_common::types::Record;
//!
//! let record = Record::new("ABC-123", "2000", 19.99);
//! assert_eq!(record.identity_key(), "ABC-123|2000");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{FreightError, Result};
pub use types::{Record, ValidationError, ValidationResult};
