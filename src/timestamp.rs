//! Normalized, totally ordered `createdAt` values.
//!
//! Numeric timestamps are taken as-is (epoch milliseconds by convention).
//! ISO 8601 values are converted to epoch milliseconds with `chrono`, so both
//! kinds can be compared in a single report.

use crate::config::TimestampPolicy;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::cmp::Ordering;

/// Naive date-time layouts accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A finite point in time, in epoch milliseconds.
///
/// Integer inputs are kept exact, so values beyond `f64` precision (such as
/// nanosecond epochs) still order correctly. Fractional inputs are kept as `f64`.
///
/// # Examples
///
/// ```
/// use canceled_report::{Timestamp, TimestampPolicy};
/// use serde_json::json;
///
/// let a = Timestamp::normalize(&json!(100), TimestampPolicy::Auto).unwrap();
/// let b = Timestamp::normalize(&json!("1970-01-01T00:00:01Z"), TimestampPolicy::Auto).unwrap();
/// assert!(b > a);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Timestamp {
    /// Whole number of milliseconds.
    Int(i128),

    /// Fractional milliseconds. Always finite.
    Float(f64),
}

impl Timestamp {
    /// Creates a timestamp from epoch milliseconds. Non-finite values are rejected.
    pub fn from_millis(millis: f64) -> Option<Self> {
        millis.is_finite().then_some(Timestamp::Float(millis))
    }

    /// Epoch milliseconds, rounded to the nearest `f64` for integer values.
    pub fn as_millis(&self) -> f64 {
        match *self {
            Timestamp::Int(i) => i as f64,
            Timestamp::Float(f) => f,
        }
    }

    /// Normalizes a raw `createdAt` value under the given policy.
    ///
    /// Returns `None` when the value cannot be interpreted; such records are
    /// left out of the report.
    pub fn normalize(value: &Value, policy: TimestampPolicy) -> Option<Self> {
        match policy {
            TimestampPolicy::Numeric => Self::from_numeric(value),
            TimestampPolicy::Iso8601 => Self::from_iso8601(value),
            TimestampPolicy::Auto => {
                Self::from_numeric(value).or_else(|| Self::from_iso8601(value))
            }
        }
    }

    fn from_numeric(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Timestamp::Int(i.into()))
                } else if let Some(u) = n.as_u64() {
                    Some(Timestamp::Int(u.into()))
                } else {
                    n.as_f64().and_then(Self::from_millis)
                }
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<i128>() {
                    Ok(i) => Some(Timestamp::Int(i)),
                    Err(_) => trimmed.parse::<f64>().ok().and_then(Self::from_millis),
                }
            }
            _ => None,
        }
    }

    fn from_iso8601(value: &Value) -> Option<Self> {
        let text = value.as_str()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::from_micros(dt.timestamp_micros());
        }

        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Self::from_micros(naive.and_utc().timestamp_micros());
            }
        }

        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Self::from_micros(midnight.and_utc().timestamp_micros())
    }

    fn from_micros(micros: i64) -> Option<Self> {
        if micros % 1000 == 0 {
            Some(Timestamp::Int((micros / 1000).into()))
        } else {
            Self::from_millis(micros as f64 / 1000.0)
        }
    }
}

/// Exact comparison of an integer against a finite float.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    // 2^127: every finite float at or beyond it lies outside the i128 range.
    let limit = 2f64.powi(127);
    if float >= limit {
        return Ordering::Less;
    }
    if float < -limit {
        return Ordering::Greater;
    }

    let floor = float.floor();
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Ordering::Less,
        ord => ord,
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Timestamp::Int(a), Timestamp::Int(b)) => a.cmp(&b),
            (Timestamp::Float(a), Timestamp::Float(b)) => a.total_cmp(&b),
            (Timestamp::Int(a), Timestamp::Float(b)) => cmp_int_float(a, b),
            (Timestamp::Float(a), Timestamp::Int(b)) => cmp_int_float(b, a).reverse(),
        }
    }
}
