use thiserror::Error;

/// Convenience result type for loading and configuration operations.
pub type SurveyResult<T> = Result<T, SurveyError>;

/// Error type returned by loaders and configuration constructors.
///
/// Aggregation entry points never return this: per-record anomalies are reported as
/// [`RecordIssue`]s inside a [`crate::processing::BatchReport`] instead.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Underlying I/O error (e.g. dataset file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is valid JSON but does not have the expected shape.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Invalid configuration: unknown selector name, inconsistent rate table, zero top-N, ...
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl SurveyError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Why a `CompTotal` value was not accepted as a salary.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize)]
pub enum SalaryRejection {
    /// Field absent, `null` or empty.
    #[error("CompTotal is missing")]
    Missing,
    /// The literal `"NA"` sentinel.
    #[error("CompTotal was not answered")]
    NotAnswered,
    /// Not parseable as a finite decimal number.
    #[error("CompTotal '{raw}' is not a number")]
    NotNumeric { raw: String },
    /// Above the plausibility threshold.
    #[error("CompTotal {amount} is above the plausible maximum {max}")]
    AboveMaximum { amount: f64, max: f64 },
}

/// Per-record anomaly. Recoverable: the record is left out of the aggregation it fails.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize)]
pub enum RecordIssue {
    /// The currency code has no entry in the rate table.
    #[error("no exchange rate for currency '{code}'")]
    UnknownRate { code: String },

    /// `CompTotal` is missing, non-numeric or implausibly large.
    #[error("invalid salary: {0}")]
    InvalidSalary(SalaryRejection),

    /// `Currency` is missing, so the salary cannot be normalized.
    #[error("missing currency")]
    MissingCurrency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_issues_read_as_sentences() {
        let outlier = RecordIssue::InvalidSalary(SalaryRejection::AboveMaximum {
            amount: 2_000_000.0,
            max: 1_000_000.0,
        });
        assert_eq!(
            outlier.to_string(),
            "invalid salary: CompTotal 2000000 is above the plausible maximum 1000000"
        );
        let garbage = RecordIssue::InvalidSalary(SalaryRejection::NotNumeric {
            raw: "lots".to_string(),
        });
        assert_eq!(garbage.to_string(), "invalid salary: CompTotal 'lots' is not a number");
        assert_eq!(
            RecordIssue::UnknownRate {
                code: "XTS".to_string()
            }
            .to_string(),
            "no exchange rate for currency 'XTS'"
        );
    }
}
