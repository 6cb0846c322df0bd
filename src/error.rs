//! Error types for the canceled transactions report.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while loading, transforming or writing a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to open or read the input
    #[error("failed to read transactions from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON
    #[error("failed to parse transactions: {0}")]
    Parse(#[source] serde_json::Error),

    /// Input parsed, but the top-level value is not an array
    #[error("expected an array of transactions, found {found}")]
    NotAnArray { found: &'static str },

    /// Transformer was handed something other than a sequence
    #[error("invalid transformer input: expected an array of transactions, found {found}")]
    InvalidInput { found: &'static str },

    /// Report could not be serialized
    #[error("failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Report could not be written to the output
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl ReportError {
    /// Returns `true` for failures that happen before any transformation runs.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ReportError::Read { .. } | ReportError::Parse(_) | ReportError::NotAnArray { .. }
        )
    }
}

/// Human-readable name of a JSON value's kind, used in diagnostics.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
