//! Grouped salary averages.

use std::collections::HashMap;

use crate::currency::CurrencyConverter;
use crate::error::RecordIssue;
use crate::processing::sanitize::{SanitizedRecord, Sanitizer};
use crate::processing::series::{Aggregation, AverageEntry, AverageSeries, BatchReport};
use crate::types::{GroupKey, SurveyDataSet};

/// Running sum and count for one group label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateBucket {
    pub total: f64,
    pub count: usize,
}

impl AggregateBucket {
    fn first(value: f64) -> Self {
        Self {
            total: value,
            count: 1,
        }
    }

    fn add(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    pub fn average(&self) -> f64 {
        self.total / self.count as f64
    }
}

/// Average base-currency salary per [`GroupKey`] label.
///
/// Records with an invalid salary, no currency, or a currency missing from the rate table are
/// counted in the report and left out of every bucket. Labels appear in first-seen order.
///
/// ```rust
/// use std::sync::Arc;
/// use salary_survey_insights::currency::{CurrencyConverter, ExchangeRateTable};
/// use salary_survey_insights::processing::{group_by_average, Sanitizer};
/// use salary_survey_insights::types::{GroupKey, SurveyDataSet, SurveyRecord};
///
/// let ds: SurveyDataSet = vec![
///     SurveyRecord::from_pairs([("Currency", "USD\tUS Dollar"), ("CompTotal", "100000"), ("YearsCodePro", "5-9 years")]),
///     SurveyRecord::from_pairs([("Currency", "EUR\tEuro"), ("CompTotal", "50000"), ("YearsCodePro", "5-9 years")]),
/// ]
/// .into_iter()
/// .collect();
/// let table = ExchangeRateTable::new("EUR", [("USD", 0.95)]).unwrap();
/// let converter = CurrencyConverter::new(Arc::new(table));
///
/// let out = group_by_average(&ds, GroupKey::Experience, &converter, &Sanitizer::default());
/// assert_eq!(out.series.get("5-9 years"), Some(72_500.0));
/// assert_eq!(out.report.contributed, 2);
/// ```
pub fn group_by_average(
    dataset: &SurveyDataSet,
    key: GroupKey,
    converter: &CurrencyConverter,
    sanitizer: &Sanitizer,
) -> Aggregation<AverageSeries> {
    group_by_average_by(dataset, converter, sanitizer, |record| match key {
        GroupKey::Experience => record.experience.to_string(),
        GroupKey::Education => record.education.to_string(),
    })
}

/// [`group_by_average`] with an arbitrary key extractor.
pub fn group_by_average_by<F>(
    dataset: &SurveyDataSet,
    converter: &CurrencyConverter,
    sanitizer: &Sanitizer,
    mut key_fn: F,
) -> Aggregation<AverageSeries>
where
    F: FnMut(&SanitizedRecord<'_>) -> String,
{
    let mut report = BatchReport::default();
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, AggregateBucket> = HashMap::new();

    for record in dataset {
        report.records_seen += 1;
        let sanitized = sanitizer.sanitize(record);

        let converted = sanitized.compensation.clone().and_then(|c| {
            converter
                .convert(c.amount, c.currency_code)
                .map_err(|e| RecordIssue::UnknownRate { code: e.code })
        });
        let value = match converted {
            Ok(v) => v,
            Err(issue) => {
                report.record_issue(&issue);
                continue;
            }
        };

        let label = key_fn(&sanitized);
        match buckets.get_mut(&label) {
            Some(bucket) => bucket.add(value),
            None => {
                buckets.insert(label.clone(), AggregateBucket::first(value));
                order.push(label);
            }
        }
        report.contributed += 1;
    }

    let entries = order
        .into_iter()
        .filter_map(|label| {
            let bucket = buckets.remove(&label)?;
            Some(AverageEntry {
                label,
                value: bucket.average(),
            })
        })
        .collect();

    tracing::debug!(%report, "grouped averages computed");
    Aggregation {
        series: AverageSeries { entries },
        report,
    }
}
