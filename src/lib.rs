//! # Canceled Report
//!
//! Loads transaction records, keeps the canceled ones, and groups them into a
//! yearly report ordered newest to oldest.
//!
//! ## Design Principles
//!
//! - **Safe input**: Records are parsed as strict JSON, never evaluated
//! - **Silent filtering**: Non-canceled or malformed records are skipped, not errors
//! - **Numeric ordering**: Years and timestamps are compared as numbers
//! - **Pass-through records**: Output transactions are the input objects, unchanged
//!
//! ## Example
//!
//! ```
//! use canceled_report::{load_str, transform_records};
//!
//! let json = r#"[{"state": "canceled", "year": 2023, "createdAt": 100}]"#;
//! let records = load_str(json).unwrap();
//! let groups = transform_records(&records);
//! assert_eq!(groups[0].year, 2023);
//! ```

pub mod config;
pub mod error;
pub mod group;
pub mod loader;
pub mod report;
pub mod timestamp;
pub mod transaction;

pub use config::{ReportConfig, TimestampPolicy};
pub use error::{ReportError, Result};
pub use group::YearGroup;
pub use loader::{load_path, load_reader, load_str};
pub use report::{transform, transform_records, transform_with, CanceledReport};
pub use timestamp::Timestamp;
pub use transaction::{CanceledTransaction, Exclusion, TransactionRecord};
