//! Builds the yearly report of canceled transactions.
//!
//! Records are filtered, grouped by year in a map local to the build, and
//! emitted newest year first with each year's transactions newest first.

use crate::config::ReportConfig;
use crate::error::{kind_of, ReportError, Result};
use crate::group::YearGroup;
use crate::transaction::{CanceledTransaction, TransactionRecord};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;

/// The canceled transactions report.
///
/// # Output Ordering
///
/// Groups are ordered by year descending. Years are compared as integers,
/// so `"9"` sorts after `"10"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanceledReport {
    groups: Vec<YearGroup>,
}

impl CanceledReport {
    /// Builds a report from raw records. Unusable records are skipped.
    pub fn build(records: &[Value], config: &ReportConfig) -> Self {
        let mut buckets: BTreeMap<i64, Vec<CanceledTransaction>> = BTreeMap::new();
        let mut skipped = 0usize;

        debug!(
            "Building report for state '{}' with {} timestamps",
            config.canceled_state, config.timestamps
        );

        for (idx, value) in records.iter().enumerate() {
            match TransactionRecord::new(value).parse(config) {
                Ok(tx) => buckets.entry(tx.year).or_default().push(tx),
                Err(reason) => {
                    skipped += 1;
                    if reason.is_suspicious() {
                        warn!("Record {}: {}, skipping", idx, reason);
                    } else {
                        debug!("Record {}: {}, skipping", idx, reason);
                    }
                }
            }
        }

        let groups: Vec<YearGroup> = buckets
            .into_iter()
            .rev()
            .filter_map(|(year, bucket)| YearGroup::from_bucket(year, bucket))
            .collect();

        info!(
            "Reported {} canceled transactions in {} years ({} records skipped)",
            records.len() - skipped,
            groups.len(),
            skipped
        );

        CanceledReport { groups }
    }

    /// Year groups, newest year first.
    pub fn groups(&self) -> &[YearGroup] {
        &self.groups
    }

    /// Consumes the report, returning its groups.
    pub fn into_groups(self) -> Vec<YearGroup> {
        self.groups
    }

    /// Returns `true` when no canceled transaction was found.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Renders the report as pretty JSON with 2-space indentation and a
    /// trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.groups).map_err(ReportError::Serialize)?;
        text.push('\n');
        Ok(text)
    }

    /// Writes the report to `writer`.
    ///
    /// The whole document is rendered before anything is written, so a
    /// serialization failure never leaves partial output behind.
    pub fn write_output<W: Write>(&self, mut writer: W) -> Result<()> {
        let text = self.to_pretty_json()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Transforms a JSON value holding an array of transactions into year groups.
///
/// Fails with [`ReportError::InvalidInput`] when `input` is not an array.
pub fn transform(input: &Value) -> Result<Vec<YearGroup>> {
    transform_with(input, &ReportConfig::default())
}

/// Like [`transform`], with explicit settings.
pub fn transform_with(input: &Value, config: &ReportConfig) -> Result<Vec<YearGroup>> {
    let records = input.as_array().ok_or(ReportError::InvalidInput {
        found: kind_of(input),
    })?;
    Ok(CanceledReport::build(records, config).into_groups())
}

/// Transforms already loaded records into year groups with default settings.
pub fn transform_records(records: &[Value]) -> Vec<YearGroup> {
    CanceledReport::build(records, &ReportConfig::default()).into_groups()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimestampPolicy;
    use serde_json::json;

    fn years(groups: &[YearGroup]) -> Vec<i64> {
        groups.iter().map(|g| g.year).collect()
    }

    #[test]
    fn test_filters_and_sorts_single_year() {
        let input = json!([
            {"state": "canceled", "year": 2023, "createdAt": 100},
            {"state": "canceled", "year": 2023, "createdAt": 200},
            {"state": "pending", "year": 2023, "createdAt": 300}
        ]);

        let report = CanceledReport::build(input.as_array().unwrap(), &ReportConfig::default());
        assert_eq!(report.groups().len(), 1);
        assert_eq!(report.groups()[0].year, 2023);

        let groups = transform(&input).unwrap();
        assert_eq!(groups, report.into_groups());
        assert_eq!(
            groups[0].transactions,
            vec![
                json!({"state": "canceled", "year": 2023, "createdAt": 200}),
                json!({"state": "canceled", "year": 2023, "createdAt": 100}),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(transform(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_no_canceled_transactions() {
        let input = json!([
            {"state": "completed", "year": 2023, "createdAt": 1},
            {"state": "pending", "year": 2022, "createdAt": 2}
        ]);
        assert!(transform(&input).unwrap().is_empty());
    }

    #[test]
    fn test_years_descending() {
        let input = json!([
            {"state": "canceled", "year": 2021, "createdAt": 1},
            {"state": "canceled", "year": 2023, "createdAt": 2},
            {"state": "canceled", "year": 2022, "createdAt": 3}
        ]);
        assert_eq!(years(&transform(&input).unwrap()), vec![2023, 2022, 2021]);
    }

    #[test]
    fn test_years_compared_numerically() {
        let input = json!([
            {"state": "canceled", "year": "2", "createdAt": 1},
            {"state": "canceled", "year": "10", "createdAt": 1},
            {"state": "canceled", "year": "1", "createdAt": 1},
            {"state": "canceled", "year": "9", "createdAt": 1}
        ]);
        assert_eq!(years(&transform(&input).unwrap()), vec![10, 9, 2, 1]);
    }

    #[test]
    fn test_string_and_number_years_share_group() {
        let input = json!([
            {"id": 1, "state": "canceled", "year": "2023", "createdAt": 10},
            {"id": 2, "state": "canceled", "year": 2023, "createdAt": 20}
        ]);

        let groups = transform(&input).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].transactions[0]["id"], json!(2));
        // Records are passed through untouched, including the original year type.
        assert_eq!(groups[0].transactions[1]["year"], json!("2023"));
    }

    #[test]
    fn test_invalid_input() {
        let err = transform(&json!({"state": "canceled"})).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput { found: "an object" }));
        assert!(!err.is_load_error());

        assert!(matches!(
            transform(&json!(null)).unwrap_err(),
            ReportError::InvalidInput { found: "null" }
        ));
    }

    #[test]
    fn test_iso_timestamps_with_default_config() {
        let input = json!([
            {"id": "a", "state": "canceled", "year": 2024, "createdAt": "2024-01-05T10:00:00Z"},
            {"id": "b", "state": "canceled", "year": 2024, "createdAt": "2024-03-01"},
            {"id": "c", "state": "canceled", "year": 2024, "createdAt": "2024-02-10T08:30:00+02:00"}
        ]);

        let groups = transform(&input).unwrap();
        let ids: Vec<&str> = groups[0]
            .transactions
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_numeric_policy_skips_dates() {
        let input = json!([
            {"state": "canceled", "year": 2024, "createdAt": "2024-01-05"},
            {"state": "canceled", "year": 2024, "createdAt": 5}
        ]);
        let config = ReportConfig::default().with_timestamps(TimestampPolicy::Numeric);

        let groups = transform_with(&input, &config).unwrap();
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[0].transactions[0]["createdAt"], json!(5));
    }

    #[test]
    fn test_pretty_output_format() {
        let records = vec![json!({"state": "canceled", "year": 2023, "createdAt": 100})];
        let report = CanceledReport::build(&records, &ReportConfig::default());

        let expected = "[\n  {\n    \"year\": 2023,\n    \"transactions\": [\n      {\n        \"state\": \"canceled\",\n        \"year\": 2023,\n        \"createdAt\": 100\n      }\n    ]\n  }\n]\n";
        assert_eq!(report.to_pretty_json().unwrap(), expected);

        let mut output = Vec::new();
        report.write_output(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_empty_report_output() {
        let report = CanceledReport::build(&[], &ReportConfig::default());
        assert!(report.is_empty());
        assert_eq!(report.to_pretty_json().unwrap(), "[]\n");
    }
}
