//! `salary-survey-insights` turns raw developer-survey exports into chart-ready aggregate series.
//!
//! A survey export is a JSON array of loosely typed records (`Currency`, `CompTotal`,
//! `YearsCodePro`, `EdLevel`, `OpSysProfessionaluse`, ...). The crate loads it into an in-memory
//! [`types::SurveyDataSet`] and derives:
//!
//! - average compensation per experience bracket or education level, normalized to one base
//!   currency through an injected [`currency::ExchangeRateTable`]
//! - top-N operating systems and communication tools, optionally restricted to a job role
//! - currency usage counts
//!
//! Bad records never abort an aggregation: each call returns its series together with a
//! [`processing::BatchReport`] counting what was left out and why.
//!
//! ## Quick example
//!
//! ```rust
//! use salary_survey_insights::currency::CurrencyConverter;
//! use salary_survey_insights::ingestion::json::load_records_from_str;
//! use salary_survey_insights::processing::{group_by_average, top_n_by_frequency, Sanitizer};
//! use salary_survey_insights::types::{GroupKey, ListField};
//!
//! # fn main() -> Result<(), salary_survey_insights::SurveyError> {
//! let ds = load_records_from_str(r#"[
//!     {"Currency": "USD\tUnited States dollar", "CompTotal": "100000", "YearsCodePro": "5-9 years",
//!      "OpSysProfessionaluse": "Windows;Linux"},
//!     {"Currency": "EUR\tEuropean Euro", "CompTotal": "50000", "YearsCodePro": "5-9 years",
//!      "OpSysProfessionaluse": "Linux"},
//!     {"Currency": "EUR\tEuropean Euro", "CompTotal": "NA", "OpSysProfessionaluse": "MacOS"}
//! ]"#)?;
//!
//! let converter = CurrencyConverter::default();
//! let by_experience = group_by_average(&ds, GroupKey::Experience, &converter, &Sanitizer::default());
//! assert_eq!(by_experience.series.get("5-9 years"), Some(72_500.0));
//! assert_eq!(by_experience.report.invalid_salary, 1);
//!
//! let os = top_n_by_frequency(&ds, ListField::OperatingSystems, "", 2);
//! assert_eq!(os.series.labels().collect::<Vec<_>>(), vec!["Linux", "Windows"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: JSON loading, continent → export file selection, load observers
//! - [`types`]: survey records, typed field access, selectors
//! - [`currency`]: exchange-rate table and converter
//! - [`processing`]: filter, sanitizer, grouped averages, frequency rankings
//! - [`chart`]: `(labels, values)` adapter and the rendering-sink trait
//! - [`dashboard`]: one session wiring all views together
//! - [`error`]: error and per-record issue types

pub mod chart;
pub mod currency;
pub mod dashboard;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{RecordIssue, SurveyError, SurveyResult};
