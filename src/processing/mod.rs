//! The aggregation engine.
//!
//! Everything here is a pure, single-threaded function of an in-memory
//! [`crate::types::SurveyDataSet`]. Buckets and tallies live for one call; per-record problems are
//! counted in the returned [`BatchReport`] instead of aborting the batch.
//!
//! - [`filter()`]: country / role filtering
//! - [`sanitize()`]: per-record field extraction and salary validation
//! - [`group_by_average()`]: average base-currency salary per experience or education label
//! - [`top_n_by_frequency()`]: most frequent operating systems / communication tools
//! - [`count_currencies()`]: currency usage counts
//!
//! ## Example: filter → aggregate
//!
//! ```rust
//! use salary_survey_insights::currency::CurrencyConverter;
//! use salary_survey_insights::processing::{filter, group_by_average, RecordFilter, Sanitizer};
//! use salary_survey_insights::types::{GroupKey, SurveyDataSet, SurveyRecord};
//!
//! let ds: SurveyDataSet = vec![
//!     SurveyRecord::from_pairs([("Country", "France"), ("Currency", "EUR\tEuro"), ("CompTotal", "48000"), ("EdLevel", "Master")]),
//!     SurveyRecord::from_pairs([("Country", "France"), ("Currency", "EUR\tEuro"), ("CompTotal", "NA"), ("EdLevel", "Master")]),
//!     SurveyRecord::from_pairs([("Country", "Spain"), ("Currency", "EUR\tEuro"), ("CompTotal", "30000"), ("EdLevel", "Master")]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let france = filter(&ds, &RecordFilter::new("France", ""));
//! let out = group_by_average(&france, GroupKey::Education, &CurrencyConverter::default(), &Sanitizer::default());
//!
//! assert_eq!(out.series.get("Master"), Some(48_000.0));
//! assert_eq!(out.report.invalid_salary, 1);
//! ```

pub mod aggregate;
pub mod filter;
pub mod rank;
pub mod sanitize;
pub mod series;

pub use aggregate::{AggregateBucket, group_by_average, group_by_average_by};
pub use filter::{RecordFilter, filter};
pub use rank::{FrequencyTally, count_currencies, top_n_by_frequency, top_n_by_frequency_by};
pub use sanitize::{Compensation, MAX_PLAUSIBLE_SALARY, SanitizedRecord, Sanitizer, sanitize};
pub use series::{
    Aggregation, AverageEntry, AverageSeries, BatchReport, FrequencyEntry, FrequencySeries,
};
