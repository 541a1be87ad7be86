//! Record filtering for [`crate::types::SurveyDataSet`].

use crate::types::{SurveyDataSet, SurveyField, SurveyRecord};

/// Country and role criteria. Empty strings disable a criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact match on `Country`.
    pub country: String,
    /// Case-sensitive substring match on `DevType`.
    pub dev_type: String,
}

impl RecordFilter {
    pub fn new(country: impl Into<String>, dev_type: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            dev_type: dev_type.into(),
        }
    }

    /// `true` when neither criterion is set.
    pub fn is_pass_through(&self) -> bool {
        self.country.is_empty() && self.dev_type.is_empty()
    }

    pub fn matches(&self, record: &SurveyRecord) -> bool {
        matches_country(record, &self.country) && matches_dev_type(record, &self.dev_type)
    }
}

/// `true` if `country` is empty or equals the record's `Country`.
pub fn matches_country(record: &SurveyRecord, country: &str) -> bool {
    country.is_empty() || record.text(SurveyField::Country) == Some(country)
}

/// `true` if `dev_type` is empty or is a substring of the record's `DevType`.
///
/// Records without a `DevType` only pass an empty filter.
pub fn matches_dev_type(record: &SurveyRecord, dev_type: &str) -> bool {
    dev_type.is_empty()
        || record
            .text(SurveyField::DevType)
            .is_some_and(|d| d.contains(dev_type))
}

/// Returns a new [`SurveyDataSet`] with the records matching every criterion of `criteria`,
/// in their original order.
pub fn filter(dataset: &SurveyDataSet, criteria: &RecordFilter) -> SurveyDataSet {
    if criteria.is_pass_through() {
        return dataset.clone();
    }
    dataset.filter_records(|record| criteria.matches(record))
}
