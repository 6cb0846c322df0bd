//! Report configuration.

use std::fmt;

/// How `createdAt` values are normalized before sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Only JSON numbers and numeric strings.
    Numeric,

    /// Only ISO 8601 date-times or calendar dates.
    Iso8601,

    /// Numeric first, then ISO 8601.
    #[default]
    Auto,
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimestampPolicy::Numeric => "numeric",
            TimestampPolicy::Iso8601 => "iso8601",
            TimestampPolicy::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Settings that control which records are reported and how they are ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Value of `state` that marks a transaction as canceled.
    pub canceled_state: String,

    /// Normalization applied to `createdAt`.
    pub timestamps: TimestampPolicy,
}

impl ReportConfig {
    /// Default report settings: `"canceled"` state, automatic timestamps.
    pub fn new() -> Self {
        ReportConfig {
            canceled_state: "canceled".to_string(),
            timestamps: TimestampPolicy::Auto,
        }
    }

    /// Replaces the timestamp policy.
    pub fn with_timestamps(mut self, policy: TimestampPolicy) -> Self {
        self.timestamps = policy;
        self
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new()
    }
}
