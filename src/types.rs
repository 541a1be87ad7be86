//! Core data model types.
//!
//! A survey export is loaded into an in-memory [`SurveyDataSet`] of [`SurveyRecord`]s. Records keep
//! their raw JSON values; typed access goes through [`SurveyRecord::field`], which returns a
//! [`FieldValue`] so callers must handle absence explicitly.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;

/// The survey columns the aggregation engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SurveyField {
    Country,
    DevType,
    YearsCodePro,
    EdLevel,
    Currency,
    CompTotal,
    OpSysProfessionalUse,
    OfficeStackSyncHaveWorkedWith,
}

impl SurveyField {
    /// Column name as it appears in the survey export.
    pub fn column(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::DevType => "DevType",
            Self::YearsCodePro => "YearsCodePro",
            Self::EdLevel => "EdLevel",
            Self::Currency => "Currency",
            Self::CompTotal => "CompTotal",
            Self::OpSysProfessionalUse => "OpSysProfessionaluse",
            Self::OfficeStackSyncHaveWorkedWith => "OfficeStackSyncHaveWorkedWith",
        }
    }
}

impl fmt::Display for SurveyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Result of reading one field of a [`SurveyRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// A JSON string (possibly empty).
    Text(&'a str),
    /// A JSON number.
    Number(f64),
    /// Field absent or explicit `null`.
    Missing(SurveyField),
    /// Field present with a bool, array or object value.
    Malformed(SurveyField),
}

impl<'a> FieldValue<'a> {
    /// Returns the string value, treating empty strings as absent.
    pub fn non_empty_text(self) -> Option<&'a str> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Label used when a grouping field is absent.
pub const MISSING_LABEL: &str = "NA";

/// A single survey response: field name to raw JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyRecord {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl SurveyRecord {
    /// Wrap a JSON object.
    pub fn from_map(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }

    /// Build a record whose values are all strings.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
            .collect();
        Self { fields }
    }

    /// Set a raw value, replacing any previous one.
    pub fn insert(&mut self, field: SurveyField, value: impl Into<serde_json::Value>) {
        self.fields.insert(field.column().to_string(), value.into());
    }

    /// Typed access to a survey field.
    pub fn field(&self, field: SurveyField) -> FieldValue<'_> {
        match self.fields.get(field.column()) {
            None | Some(serde_json::Value::Null) => FieldValue::Missing(field),
            Some(serde_json::Value::String(s)) => FieldValue::Text(s),
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(v) => FieldValue::Number(v),
                None => FieldValue::Malformed(field),
            },
            Some(_) => FieldValue::Malformed(field),
        }
    }

    /// Shorthand for string-valued fields.
    pub fn text(&self, field: SurveyField) -> Option<&str> {
        match self.field(field) {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Raw access by column name, for columns the engine does not model.
    pub fn raw(&self, column: &str) -> Option<&serde_json::Value> {
        self.fields.get(column)
    }
}

/// In-memory survey dataset. Record order is the order of the source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyDataSet {
    /// Records in source order.
    pub records: Vec<SurveyRecord>,
}

impl SurveyDataSet {
    /// Create a dataset from records.
    pub fn new(records: Vec<SurveyRecord>) -> Self {
        Self { records }
    }

    /// Number of records in the dataset.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SurveyRecord> {
        self.records.iter()
    }

    /// Create a new dataset containing only records that match `predicate`, in the same order.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&SurveyRecord) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|record| predicate(*record))
            .cloned()
            .collect();
        Self { records }
    }

    /// Distinct non-empty string values of `field`, in order of first appearance.
    pub fn distinct_values(&self, field: SurveyField) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.field(field).non_empty_text())
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }
}

impl FromIterator<SurveyRecord> for SurveyDataSet {
    fn from_iter<T: IntoIterator<Item = SurveyRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SurveyDataSet {
    type Item = &'a SurveyRecord;
    type IntoIter = std::slice::Iter<'a, SurveyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Grouping key for salary averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupKey {
    /// `YearsCodePro` bracket.
    Experience,
    /// `EdLevel`.
    Education,
}

impl GroupKey {
    pub fn field(self) -> SurveyField {
        match self {
            Self::Experience => SurveyField::YearsCodePro,
            Self::Education => SurveyField::EdLevel,
        }
    }
}

impl FromStr for GroupKey {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "experience" | "yearscodepro" => Ok(Self::Experience),
            "education" | "edlevel" => Ok(Self::Education),
            other => Err(SurveyError::config(format!("unknown group key '{other}'"))),
        }
    }
}

/// Multi-value column used for frequency rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListField {
    /// `OpSysProfessionaluse`.
    OperatingSystems,
    /// `OfficeStackSyncHaveWorkedWith`.
    CommunicationTools,
}

impl ListField {
    pub fn field(self) -> SurveyField {
        match self {
            Self::OperatingSystems => SurveyField::OpSysProfessionalUse,
            Self::CommunicationTools => SurveyField::OfficeStackSyncHaveWorkedWith,
        }
    }
}

impl FromStr for ListField {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "operating-systems" | "os" => Ok(Self::OperatingSystems),
            "communication-tools" | "tools" => Ok(Self::CommunicationTools),
            other => Err(SurveyError::config(format!("unknown list field '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> SurveyRecord {
        match value {
            serde_json::Value::Object(map) => SurveyRecord::from_map(map),
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn field_access_distinguishes_missing_from_empty() {
        let r = record(json!({"Country": "", "CompTotal": 42, "EdLevel": null, "DevType": true}));
        assert_eq!(r.field(SurveyField::Country), FieldValue::Text(""));
        assert_eq!(r.field(SurveyField::CompTotal), FieldValue::Number(42.0));
        assert_eq!(
            r.field(SurveyField::EdLevel),
            FieldValue::Missing(SurveyField::EdLevel)
        );
        assert_eq!(
            r.field(SurveyField::YearsCodePro),
            FieldValue::Missing(SurveyField::YearsCodePro)
        );
        assert_eq!(
            r.field(SurveyField::DevType),
            FieldValue::Malformed(SurveyField::DevType)
        );
        assert_eq!(r.field(SurveyField::Country).non_empty_text(), None);
    }

    #[test]
    fn os_column_uses_export_spelling() {
        let r = SurveyRecord::from_pairs([("OpSysProfessionaluse", "Linux")]);
        assert_eq!(r.text(SurveyField::OpSysProfessionalUse), Some("Linux"));
    }

    #[test]
    fn filter_records_preserves_order_and_leaves_original() {
        let ds: SurveyDataSet = ["a", "b", "c"]
            .into_iter()
            .map(|c| SurveyRecord::from_pairs([("Country", c)]))
            .collect();
        let out = ds.filter_records(|r| r.text(SurveyField::Country) != Some("b"));
        assert_eq!(out.record_count(), 2);
        assert_eq!(out.records[0].text(SurveyField::Country), Some("a"));
        assert_eq!(out.records[1].text(SurveyField::Country), Some("c"));
        assert_eq!(ds.record_count(), 3);
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let ds: SurveyDataSet = ["France", "Germany", "France", "", "Spain"]
            .into_iter()
            .map(|c| SurveyRecord::from_pairs([("Country", c)]))
            .chain(std::iter::once(SurveyRecord::default()))
            .collect();
        assert_eq!(
            ds.distinct_values(SurveyField::Country),
            vec!["France", "Germany", "Spain"]
        );
    }

    #[test]
    fn selectors_parse_and_reject_unknown_names() {
        assert_eq!("Experience".parse::<GroupKey>().unwrap(), GroupKey::Experience);
        assert_eq!("edlevel".parse::<GroupKey>().unwrap(), GroupKey::Education);
        assert_eq!(
            "communication-tools".parse::<ListField>().unwrap(),
            ListField::CommunicationTools
        );
        let err = "salary".parse::<GroupKey>().unwrap_err();
        assert!(err.to_string().contains("unknown group key 'salary'"));
        assert!(matches!(
            "browsers".parse::<ListField>(),
            Err(SurveyError::Config { .. })
        ));
    }
}
