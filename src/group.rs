//! One year of canceled transactions.

use crate::transaction::CanceledTransaction;
use serde::Serialize;
use serde_json::Value;

/// A year paired with its canceled transactions.
///
/// # Invariants
///
/// - `transactions` is never empty
/// - `transactions` is ordered by `createdAt`, newest first; ties keep input order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroup {
    /// Reporting year.
    pub year: i64,

    /// Original records, unchanged.
    pub transactions: Vec<Value>,
}

impl YearGroup {
    /// Builds a group from one year's bucket, sorting it newest first.
    ///
    /// Returns `None` for an empty bucket.
    pub(crate) fn from_bucket(year: i64, mut bucket: Vec<CanceledTransaction>) -> Option<Self> {
        if bucket.is_empty() {
            return None;
        }

        // `sort_by` is stable, so equal timestamps keep their input order.
        bucket.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Some(YearGroup {
            year,
            transactions: bucket.into_iter().map(|tx| tx.record).collect(),
        })
    }

    /// Number of transactions in the group.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Always `false` for groups produced by a report.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
