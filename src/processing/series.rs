//! Aggregation outputs: ordered series plus a per-call [`BatchReport`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::RecordIssue;

/// One `{label, average}` point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageEntry {
    pub label: String,
    pub value: f64,
}

/// Grouped averages in first-seen label order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AverageSeries {
    pub entries: Vec<AverageEntry>,
}

impl AverageSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Average for `label`, if that group had contributing records.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

/// One `{label, count}` point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

/// Label counts. Ranked series are in descending count order, ties by first encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencySeries {
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencySeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Sort by count, descending. The sort is stable, so equal counts keep their current order.
    pub fn ranked(mut self) -> Self {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self
    }

    /// Keep at most the first `n` entries.
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Per-record outcomes of one aggregation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Records handed to the aggregation.
    pub records_seen: usize,
    /// Records that reached a bucket or tally.
    pub contributed: usize,
    /// Records dropped by the role filter of a ranking.
    pub skipped_by_filter: usize,
    pub invalid_salary: usize,
    pub missing_currency: usize,
    pub unknown_rate: usize,
    /// Unknown-rate rejections per currency code.
    pub unknown_currencies: BTreeMap<String, usize>,
}

impl BatchReport {
    /// Count one rejected record.
    pub fn record_issue(&mut self, issue: &RecordIssue) {
        match issue {
            RecordIssue::UnknownRate { code } => {
                self.unknown_rate += 1;
                *self.unknown_currencies.entry(code.clone()).or_default() += 1;
            }
            RecordIssue::InvalidSalary(_) => self.invalid_salary += 1,
            RecordIssue::MissingCurrency => self.missing_currency += 1,
        }
    }

    /// Records excluded because of a [`RecordIssue`].
    pub fn rejected(&self) -> usize {
        self.invalid_salary + self.missing_currency + self.unknown_rate
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seen={}, contributed={}, skipped_by_filter={}, invalid_salary={}, missing_currency={}, unknown_rate={}",
            self.records_seen,
            self.contributed,
            self.skipped_by_filter,
            self.invalid_salary,
            self.missing_currency,
            self.unknown_rate
        )
    }
}

/// A series together with the report of the call that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation<S> {
    pub series: S,
    pub report: BatchReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalaryRejection;

    fn freq(pairs: &[(&str, usize)]) -> FrequencySeries {
        FrequencySeries {
            entries: pairs
                .iter()
                .map(|(label, count)| FrequencyEntry {
                    label: label.to_string(),
                    count: *count,
                })
                .collect(),
        }
    }

    #[test]
    fn ranked_is_stable_for_ties() {
        let out = freq(&[("a", 1), ("b", 3), ("c", 1), ("d", 3)]).ranked();
        assert_eq!(out.labels().collect::<Vec<_>>(), vec!["b", "d", "a", "c"]);
        assert_eq!(out.total(), 8);
    }

    #[test]
    fn top_truncates_without_padding() {
        assert_eq!(freq(&[("a", 2), ("b", 1)]).top(5).len(), 2);
        assert_eq!(freq(&[("a", 2), ("b", 1)]).top(1), freq(&[("a", 2)]));
        assert!(freq(&[("a", 2)]).top(0).is_empty());
    }

    #[test]
    fn report_counts_issues_by_kind() {
        let mut report = BatchReport::default();
        report.record_issue(&RecordIssue::UnknownRate {
            code: "XYZ".to_string(),
        });
        report.record_issue(&RecordIssue::UnknownRate {
            code: "XYZ".to_string(),
        });
        report.record_issue(&RecordIssue::MissingCurrency);
        report.record_issue(&RecordIssue::InvalidSalary(SalaryRejection::Missing));

        assert_eq!(report.unknown_rate, 2);
        assert_eq!(report.unknown_currencies.get("XYZ"), Some(&2));
        assert_eq!(report.rejected(), 4);
        assert!(report.to_string().contains("unknown_rate=2"));
    }
}
