//! Per-record field extraction and validation.
//!
//! Sanitizing never fails as a whole: grouping labels fall back to [`MISSING_LABEL`], list fields
//! fall back to an empty list, and only the salary part carries a [`RecordIssue`] for
//! aggregations that need a normalized compensation.

use std::borrow::Cow;

use crate::error::{RecordIssue, SalaryRejection};
use crate::types::{FieldValue, MISSING_LABEL, SurveyField, SurveyRecord};

/// Compensation values above this are treated as data-entry outliers.
pub const MAX_PLAUSIBLE_SALARY: f64 = 1_000_000.0;

/// Separator of multi-value columns.
pub const LIST_SEPARATOR: char = ';';

/// A validated salary with the currency it was reported in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compensation<'a> {
    /// Raw amount, in `currency_code`.
    pub amount: f64,
    pub currency_code: &'a str,
}

/// The usable fields of one survey record.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedRecord<'a> {
    pub experience: Cow<'a, str>,
    pub education: Cow<'a, str>,
    pub dev_type: Option<&'a str>,
    pub compensation: Result<Compensation<'a>, RecordIssue>,
    pub operating_systems: Vec<&'a str>,
    pub communication_tools: Vec<&'a str>,
}

/// Record sanitizer with a configurable plausibility threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sanitizer {
    /// Upper bound (inclusive) on the raw `CompTotal` amount.
    pub max_salary: f64,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            max_salary: MAX_PLAUSIBLE_SALARY,
        }
    }
}

impl Sanitizer {
    pub fn new(max_salary: f64) -> Self {
        Self { max_salary }
    }

    /// Extract every field the aggregations use.
    pub fn sanitize<'a>(&self, record: &'a SurveyRecord) -> SanitizedRecord<'a> {
        SanitizedRecord {
            experience: group_label(record, SurveyField::YearsCodePro),
            education: group_label(record, SurveyField::EdLevel),
            dev_type: record.text(SurveyField::DevType),
            compensation: self.compensation(record),
            operating_systems: list_items(record, SurveyField::OpSysProfessionalUse),
            communication_tools: list_items(record, SurveyField::OfficeStackSyncHaveWorkedWith),
        }
    }

    /// Salary and currency code, validated.
    ///
    /// The salary is checked before the currency, so an outlier is reported as
    /// [`RecordIssue::InvalidSalary`] whatever its currency.
    pub fn compensation<'a>(
        &self,
        record: &'a SurveyRecord,
    ) -> Result<Compensation<'a>, RecordIssue> {
        let amount = self.salary(record).map_err(|rejection| {
            tracing::debug!(?rejection, "salary rejected");
            RecordIssue::InvalidSalary(rejection)
        })?;
        let currency_code = currency_code(record).ok_or(RecordIssue::MissingCurrency)?;
        Ok(Compensation {
            amount,
            currency_code,
        })
    }

    fn salary(&self, record: &SurveyRecord) -> Result<f64, SalaryRejection> {
        let amount = match record.field(SurveyField::CompTotal) {
            FieldValue::Missing(_) => return Err(SalaryRejection::Missing),
            FieldValue::Text("") => return Err(SalaryRejection::Missing),
            FieldValue::Text(MISSING_LABEL) => return Err(SalaryRejection::NotAnswered),
            FieldValue::Text(raw) => parse_amount(raw)?,
            FieldValue::Number(n) => n,
            FieldValue::Malformed(field) => {
                let raw = record
                    .raw(field.column())
                    .map(ToString::to_string)
                    .unwrap_or_default();
                return Err(SalaryRejection::NotNumeric { raw });
            }
        };

        if amount > self.max_salary {
            return Err(SalaryRejection::AboveMaximum {
                amount,
                max: self.max_salary,
            });
        }
        Ok(amount)
    }
}

fn parse_amount(raw: &str) -> Result<f64, SalaryRejection> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SalaryRejection::NotNumeric {
            raw: raw.to_string(),
        }),
    }
}

/// Sanitize with the default threshold ([`MAX_PLAUSIBLE_SALARY`]).
pub fn sanitize(record: &SurveyRecord) -> SanitizedRecord<'_> {
    Sanitizer::default().sanitize(record)
}

/// Currency code: the part of `Currency` before the first tab.
///
/// `None` when the field is absent or the code is empty. Any other code, `"NA"` included, is
/// left to the rate table.
pub fn currency_code(record: &SurveyRecord) -> Option<&str> {
    let raw = record.field(SurveyField::Currency).non_empty_text()?;
    let code = raw.split('\t').next().unwrap_or(raw);
    (!code.is_empty()).then_some(code)
}

/// Grouping label for `field`, or [`MISSING_LABEL`] when absent or empty.
pub fn group_label(record: &SurveyRecord, field: SurveyField) -> Cow<'_, str> {
    match record.field(field) {
        FieldValue::Text(s) if !s.is_empty() => Cow::Borrowed(s),
        FieldValue::Number(n) => Cow::Owned(n.to_string()),
        _ => Cow::Borrowed(MISSING_LABEL),
    }
}

/// Items of a `;`-separated column, untrimmed. Absent (or non-string) columns yield no items;
/// an empty string yields one empty item.
pub fn list_items(record: &SurveyRecord, field: SurveyField) -> Vec<&str> {
    match record.field(field) {
        FieldValue::Text(s) => s.split(LIST_SEPARATOR).collect(),
        _ => Vec::new(),
    }
}
