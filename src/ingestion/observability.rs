use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::SurveyError;

use super::source::Continent;

/// How bad a failed load is. Ordered, so it can be compared against an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    Warning,
    /// The export was read but its content is unusable.
    Error,
    /// The export could not be read at all.
    Critical,
}

impl LoadSeverity {
    /// Severity of a loader error: I/O is critical, malformed content is an error.
    pub fn of(error: &SurveyError) -> Self {
        match error {
            SurveyError::Io(_) => Self::Critical,
            SurveyError::Json(_) | SurveyError::SchemaMismatch { .. } | SurveyError::Config { .. } => {
                Self::Error
            }
        }
    }
}

/// Which export a load attempt was for.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub path: PathBuf,
    /// Set when the path came from a [`Continent`] selection.
    pub continent: Option<Continent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub records: usize,
}

/// Receives the outcome of every survey load.
///
/// A failed load always gets exactly one `on_failure`; `on_alert` follows it when the severity
/// reaches [`crate::ingestion::LoadOptions::alert_at_or_above`].
pub trait LoadObserver: Send + Sync {
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &SurveyError) {}

    fn on_alert(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &SurveyError) {}
}

/// Forwards every callback to each inner observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SurveyError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SurveyError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Reports load events as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        tracing::info!(
            path = %ctx.path.display(),
            continent = ?ctx.continent,
            records = stats.records,
            "survey loaded"
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SurveyError) {
        tracing::warn!(
            path = %ctx.path.display(),
            continent = ?ctx.continent,
            ?severity,
            %error,
            "survey load failed"
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SurveyError) {
        tracing::error!(
            path = %ctx.path.display(),
            continent = ?ctx.continent,
            ?severity,
            %error,
            "survey load failed (alert)"
        );
    }
}
