//! Transaction records as read from the input, and their validated form.

use crate::config::ReportConfig;
use crate::timestamp::Timestamp;
use serde_json::{Map, Value};
use std::fmt;

/// JSON key holding the transaction state.
pub const STATE_FIELD: &str = "state";

/// JSON key holding the reporting year.
pub const YEAR_FIELD: &str = "year";

/// JSON key holding the creation timestamp.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Raw transaction record as read from the input.
///
/// A thin view over a JSON value. Every field is optional; nothing is
/// validated until [`TransactionRecord::parse`] is called.
#[derive(Debug, Clone, Copy)]
pub struct TransactionRecord<'a> {
    value: &'a Value,
}

impl<'a> TransactionRecord<'a> {
    /// Wraps a raw input value.
    pub fn new(value: &'a Value) -> Self {
        TransactionRecord { value }
    }

    fn fields(&self) -> Option<&'a Map<String, Value>> {
        self.value.as_object()
    }

    /// The `state` field, if present and a string.
    pub fn state(&self) -> Option<&'a str> {
        self.fields()?.get(STATE_FIELD)?.as_str()
    }

    /// The raw `year` field, if present.
    pub fn year(&self) -> Option<&'a Value> {
        self.fields()?.get(YEAR_FIELD)
    }

    /// The raw `createdAt` field, if present.
    pub fn created_at(&self) -> Option<&'a Value> {
        self.fields()?.get(CREATED_AT_FIELD)
    }

    /// Validates the record for the canceled report.
    ///
    /// Returns the reason for exclusion when the record is not a canceled
    /// transaction with a usable year and creation timestamp.
    pub fn parse(&self, config: &ReportConfig) -> Result<CanceledTransaction, Exclusion> {
        if self.fields().is_none() {
            return Err(Exclusion::NotAnObject);
        }

        if self.state() != Some(config.canceled_state.as_str()) {
            return Err(Exclusion::NotCanceled);
        }

        let raw_year = self.year().ok_or(Exclusion::MissingField(YEAR_FIELD))?;
        let raw_created_at = self
            .created_at()
            .ok_or(Exclusion::MissingField(CREATED_AT_FIELD))?;

        let year = coerce_year(raw_year).ok_or(Exclusion::InvalidYear)?;
        let created_at =
            Timestamp::normalize(raw_created_at, config.timestamps).ok_or(Exclusion::InvalidCreatedAt)?;

        Ok(CanceledTransaction {
            year,
            created_at,
            record: self.value.clone(),
        })
    }
}

/// Coerces an integer-like JSON value into a year.
///
/// Accepts integers, floats without a fractional part, and strings holding a
/// base-10 integer.
pub fn coerce_year(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
            (f.fract() == 0.0 && in_range).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Why a record was left out of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The element is not a JSON object (including `null`).
    NotAnObject,

    /// `state` is missing or not the canceled state.
    NotCanceled,

    /// A required field is absent.
    MissingField(&'static str),

    /// `year` is present but not integer-like.
    InvalidYear,

    /// `createdAt` is present but cannot be normalized.
    InvalidCreatedAt,
}

impl Exclusion {
    /// Canceled records that were dropped because of unusable values.
    pub fn is_suspicious(&self) -> bool {
        matches!(self, Exclusion::InvalidYear | Exclusion::InvalidCreatedAt)
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::NotAnObject => write!(f, "not an object"),
            Exclusion::NotCanceled => write!(f, "not canceled"),
            Exclusion::MissingField(field) => write!(f, "missing '{}'", field),
            Exclusion::InvalidYear => write!(f, "'{}' is not an integer", YEAR_FIELD),
            Exclusion::InvalidCreatedAt => {
                write!(f, "'{}' is not a recognized timestamp", CREATED_AT_FIELD)
            }
        }
    }
}

/// A canceled transaction ready for grouping.
#[derive(Debug, Clone)]
pub struct CanceledTransaction {
    /// Reporting year, coerced to an integer.
    pub year: i64,

    /// Normalized creation time.
    pub created_at: Timestamp,

    /// The original record, unchanged.
    pub record: Value,
}
