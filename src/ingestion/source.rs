//! Dataset selection and failure-tolerant loading.
//!
//! The survey ships as one export per region. [`Continent`] maps a selection to its file under
//! [`LoadOptions::data_dir`]. The `*_or_empty` entry points turn any loader failure into an empty
//! [`SurveyDataSet`] after reporting it, so the aggregation engine only ever sees a collection.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{SurveyError, SurveyResult};
use crate::types::SurveyDataSet;

use super::json::load_records_from_path;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Regional survey export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Continent {
    /// Western Europe export (default selection).
    #[default]
    Europe,
    /// North America export.
    NorthAmerica,
}

impl Continent {
    /// File name of the export for this continent.
    pub fn dataset_file(self) -> &'static str {
        match self {
            Self::Europe => "survey_results_WE.json",
            Self::NorthAmerica => "survey_results_NA.json",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
        })
    }
}

impl FromStr for Continent {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "europe" | "we" => Ok(Self::Europe),
            "north america" | "northamerica" | "america" | "na" => Ok(Self::NorthAmerica),
            other => Err(SurveyError::Config {
                message: format!("unknown continent '{other}'"),
            }),
        }
    }
}

/// Options controlling loading.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Directory holding the regional exports.
    pub data_dir: PathBuf,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("data_dir", &self.data_dir)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Path of the export for `continent`.
    pub fn dataset_path(&self, continent: Continent) -> PathBuf {
        self.data_dir.join(continent.dataset_file())
    }
}

/// Load a survey file, reporting the outcome to `options.observer`.
///
/// - `on_success` with the record count
/// - `on_failure` with a computed [`LoadSeverity`]
/// - `on_alert` when that severity is >= `options.alert_at_or_above`
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> SurveyResult<SurveyDataSet> {
    let ctx = LoadContext {
        path: path.as_ref().to_path_buf(),
        continent: None,
    };
    load_with_context(&ctx, options)
}

/// Load the export for `continent` from `options.data_dir`.
pub fn load_continent(continent: Continent, options: &LoadOptions) -> SurveyResult<SurveyDataSet> {
    let ctx = LoadContext {
        path: options.dataset_path(continent),
        continent: Some(continent),
    };
    load_with_context(&ctx, options)
}

/// Like [`load_from_path`], but a failure yields an empty dataset.
///
/// The failure still reaches `options.observer`, or a `tracing` warning when none is set.
pub fn load_or_empty(path: impl AsRef<Path>, options: &LoadOptions) -> SurveyDataSet {
    load_from_path(path, options).unwrap_or_default()
}

/// Like [`load_continent`], but a failure yields an empty dataset.
pub fn load_continent_or_empty(continent: Continent, options: &LoadOptions) -> SurveyDataSet {
    load_continent(continent, options).unwrap_or_default()
}

fn load_with_context(ctx: &LoadContext, options: &LoadOptions) -> SurveyResult<SurveyDataSet> {
    let result = load_records_from_path(&ctx.path);

    match (&options.observer, &result) {
        (Some(observer), Ok(ds)) => observer.on_success(
            ctx,
            LoadStats {
                records: ds.record_count(),
            },
        ),
        (Some(observer), Err(e)) => {
            let severity = LoadSeverity::of(e);
            observer.on_failure(ctx, severity, e);
            if severity >= options.alert_at_or_above {
                observer.on_alert(ctx, severity, e);
            }
        }
        // No observer: the failure is still logged.
        (None, Err(e)) => tracing::warn!(
            path = %ctx.path.display(),
            continent = ?ctx.continent,
            severity = ?LoadSeverity::of(e),
            error = %e,
            "survey load failed"
        ),
        (None, Ok(_)) => {}
    }

    result
}
