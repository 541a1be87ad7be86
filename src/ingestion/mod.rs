//! Loading survey exports into memory.
//!
//! Most callers should use [`load_continent_or_empty`] (from [`source`]) which:
//!
//! - maps a [`Continent`] to its export file under [`LoadOptions::data_dir`]
//! - parses the JSON array (or NDJSON) into a [`crate::types::SurveyDataSet`]
//! - reports success/failure/alerts to an optional [`LoadObserver`]
//! - hands back an empty dataset when loading fails
//!
//! The raw parser is available under [`json`].

pub mod json;
pub mod observability;
pub mod source;

pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use source::{
    Continent, LoadOptions, load_continent, load_continent_or_empty, load_from_path, load_or_empty,
};
