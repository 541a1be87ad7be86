//! Frequency tallies over multi-value columns, and top-N rankings.

use std::collections::HashMap;

use crate::processing::filter::matches_dev_type;
use crate::processing::sanitize::{currency_code, list_items};
use crate::processing::series::{Aggregation, BatchReport, FrequencyEntry, FrequencySeries};
use crate::types::{ListField, SurveyDataSet, SurveyRecord};

/// Label → count, remembering first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTally {
    index: HashMap<String, usize>,
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(FrequencyEntry {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-encounter order.
    pub fn into_series(self) -> FrequencySeries {
        FrequencySeries {
            entries: self.entries,
        }
    }
}

/// The `n` most frequent items of `field`, among records whose `DevType` contains `dev_type`.
///
/// An empty `dev_type` keeps every record. Items are counted as written (no trimming or
/// deduplication). Ties keep first-encounter order; fewer than `n` labels returns them all.
///
/// ```rust
/// use salary_survey_insights::processing::top_n_by_frequency;
/// use salary_survey_insights::types::{ListField, SurveyDataSet, SurveyRecord};
///
/// let ds: SurveyDataSet = ["Windows;Linux", "Linux", "MacOS"]
///     .into_iter()
///     .map(|os| SurveyRecord::from_pairs([("OpSysProfessionaluse", os)]))
///     .collect();
///
/// let out = top_n_by_frequency(&ds, ListField::OperatingSystems, "", 2);
/// let top: Vec<_> = out.series.entries.iter().map(|e| (e.label.as_str(), e.count)).collect();
/// assert_eq!(top, vec![("Linux", 2), ("Windows", 1)]);
/// ```
pub fn top_n_by_frequency(
    dataset: &SurveyDataSet,
    field: ListField,
    dev_type: &str,
    n: usize,
) -> Aggregation<FrequencySeries> {
    let column = field.field();
    top_n_by_frequency_by(dataset, dev_type, n, |record| list_items(record, column))
}

/// [`top_n_by_frequency`] with an arbitrary item extractor.
pub fn top_n_by_frequency_by<'a, F>(
    dataset: &'a SurveyDataSet,
    dev_type: &str,
    n: usize,
    mut items_fn: F,
) -> Aggregation<FrequencySeries>
where
    F: FnMut(&'a SurveyRecord) -> Vec<&'a str>,
{
    let mut report = BatchReport::default();
    let mut tally = FrequencyTally::new();

    for record in dataset {
        report.records_seen += 1;
        if !matches_dev_type(record, dev_type) {
            report.skipped_by_filter += 1;
            continue;
        }

        let items = items_fn(record);
        if !items.is_empty() {
            report.contributed += 1;
        }
        for item in items {
            tally.add(item);
        }
    }

    let distinct = tally.len();
    let series = tally.into_series().ranked().top(n);
    tracing::debug!(%report, distinct, kept = series.len(), "frequency ranking computed");
    Aggregation { series, report }
}

/// How many records report each currency code, in first-encounter order (unranked).
///
/// Records without a usable currency code are counted as [`BatchReport::missing_currency`].
pub fn count_currencies(dataset: &SurveyDataSet) -> Aggregation<FrequencySeries> {
    let mut report = BatchReport::default();
    let mut tally = FrequencyTally::new();

    for record in dataset {
        report.records_seen += 1;
        match currency_code(record) {
            Some(code) => {
                tally.add(code);
                report.contributed += 1;
            }
            None => report.missing_currency += 1,
        }
    }

    Aggregation {
        series: tally.into_series(),
        report,
    }
}
