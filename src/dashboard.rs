//! A dashboard session: one loaded dataset, one rate table, refreshed per filter selection.
//!
//! [`Dashboard::refresh`] runs the whole pipeline (filter → aggregate → [`ChartData`] → sink) for
//! every [`ChartKind`] and returns the batch report of each view.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chart::{ChartData, ChartKind, RenderSink};
use crate::currency::CurrencyConverter;
use crate::error::{SurveyError, SurveyResult};
use crate::ingestion::{Continent, LoadOptions, load_continent_or_empty};
use crate::processing::{
    BatchReport, RecordFilter, Sanitizer, count_currencies, filter, group_by_average,
    top_n_by_frequency,
};
use crate::types::{GroupKey, ListField, SurveyDataSet, SurveyField};

/// Number of entries in a top-N view unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// Settings of one top-N view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopListOptions {
    /// Role substring; empty keeps every role.
    pub dev_type: String,
    /// Maximum number of entries. Must be positive.
    pub top_n: usize,
}

impl Default for TopListOptions {
    fn default() -> Self {
        Self {
            dev_type: String::new(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Filter selection of a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Exact country; empty means all countries.
    pub country: String,
    pub operating_systems: TopListOptions,
    pub communication_tools: TopListOptions,
}

impl DashboardOptions {
    pub fn validate(&self) -> SurveyResult<()> {
        for (name, opts) in [
            ("operating_systems", &self.operating_systems),
            ("communication_tools", &self.communication_tools),
        ] {
            if opts.top_n == 0 {
                return Err(SurveyError::Config {
                    message: format!("{name}.top_n must be > 0"),
                });
            }
        }
        Ok(())
    }
}

/// What one refresh did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Records left after the country filter.
    pub records: usize,
    pub charts: BTreeMap<ChartKind, BatchReport>,
}

/// Loaded dataset plus the converter used for every refresh.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: SurveyDataSet,
    converter: CurrencyConverter,
    sanitizer: Sanitizer,
}

impl Dashboard {
    pub fn new(dataset: SurveyDataSet, converter: CurrencyConverter) -> Self {
        Self {
            dataset,
            converter,
            sanitizer: Sanitizer::default(),
        }
    }

    /// Load the export for `continent`. A failed load gives an empty (but usable) dashboard.
    pub fn load(continent: Continent, options: &LoadOptions, converter: CurrencyConverter) -> Self {
        Self::new(load_continent_or_empty(continent, options), converter)
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn dataset(&self) -> &SurveyDataSet {
        &self.dataset
    }

    /// Countries present in the dataset, in first-seen order (the country selector entries).
    pub fn country_options(&self) -> Vec<String> {
        self.dataset.distinct_values(SurveyField::Country)
    }

    /// Recompute every view for `options` and push it to `sink`.
    ///
    /// Empty selections are rendered as empty charts. Errors only on invalid `options`.
    pub fn refresh(
        &self,
        options: &DashboardOptions,
        sink: &mut dyn RenderSink,
    ) -> SurveyResult<DashboardReport> {
        options.validate()?;

        let data = filter(&self.dataset, &RecordFilter::new(options.country.as_str(), ""));
        if data.is_empty() {
            tracing::info!(country = %options.country, "no survey records for selection");
        }

        let mut report = DashboardReport {
            records: data.record_count(),
            charts: BTreeMap::new(),
        };

        for (kind, key) in [
            (ChartKind::SalaryByExperience, GroupKey::Experience),
            (ChartKind::SalaryByEducation, GroupKey::Education),
        ] {
            let out = group_by_average(&data, key, &self.converter, &self.sanitizer);
            sink.render(kind, &ChartData::from(&out.series));
            report.charts.insert(kind, out.report);
        }

        for (kind, field, opts) in [
            (
                ChartKind::OperatingSystems,
                ListField::OperatingSystems,
                &options.operating_systems,
            ),
            (
                ChartKind::CommunicationTools,
                ListField::CommunicationTools,
                &options.communication_tools,
            ),
        ] {
            let out = top_n_by_frequency(&data, field, &opts.dev_type, opts.top_n);
            sink.render(kind, &ChartData::from(&out.series));
            report.charts.insert(kind, out.report);
        }

        let out = count_currencies(&data);
        sink.render(ChartKind::Currencies, &ChartData::from(&out.series));
        report.charts.insert(ChartKind::Currencies, out.report);

        tracing::debug!(records = report.records, "dashboard refreshed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::RenderedChart;
    use crate::types::SurveyRecord;

    fn dashboard() -> Dashboard {
        let ds: SurveyDataSet = vec![
            SurveyRecord::from_pairs([
                ("Country", "France"),
                ("Currency", "EUR\tEuropean Euro"),
                ("CompTotal", "40000"),
                ("YearsCodePro", "3-4 years"),
                ("EdLevel", "Master"),
                ("DevType", "Developer, back-end"),
                ("OpSysProfessionaluse", "Linux;Windows"),
                ("OfficeStackSyncHaveWorkedWith", "Slack;Zoom"),
            ]),
            SurveyRecord::from_pairs([
                ("Country", "Switzerland"),
                ("Currency", "CHF\tSwiss franc"),
                ("CompTotal", "100000"),
                ("YearsCodePro", "10-14 years"),
                ("EdLevel", "Master"),
                ("DevType", "Engineering manager"),
                ("OpSysProfessionaluse", "MacOS"),
                ("OfficeStackSyncHaveWorkedWith", "Microsoft Teams"),
            ]),
        ]
        .into_iter()
        .collect();
        Dashboard::new(ds, CurrencyConverter::default())
    }

    #[test]
    fn refresh_renders_every_view_once() {
        let mut sink: Vec<RenderedChart> = Vec::new();
        let report = dashboard()
            .refresh(&DashboardOptions::default(), &mut sink)
            .unwrap();

        let kinds: Vec<_> = sink.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, ChartKind::ALL.to_vec());
        assert_eq!(report.records, 2);
        assert_eq!(report.charts.len(), 5);
        for chart in &sink {
            assert_eq!(chart.data.labels.len(), chart.data.values.len());
        }
    }

    #[test]
    fn country_selection_narrows_every_view() {
        let mut sink: Vec<RenderedChart> = Vec::new();
        let options = DashboardOptions {
            country: "France".to_string(),
            ..Default::default()
        };
        let report = dashboard().refresh(&options, &mut sink).unwrap();
        assert_eq!(report.records, 1);
        assert_eq!(sink[0].data.labels, vec!["3-4 years"]);
        assert_eq!(sink[0].data.values, vec![40_000.0]);
        assert_eq!(sink[4].data.labels, vec!["EUR"]);
    }

    #[test]
    fn unknown_country_renders_empty_charts() {
        let mut sink: Vec<RenderedChart> = Vec::new();
        let options = DashboardOptions {
            country: "Atlantis".to_string(),
            ..Default::default()
        };
        let report = dashboard().refresh(&options, &mut sink).unwrap();
        assert_eq!(report.records, 0);
        assert_eq!(sink.len(), 5);
        assert!(sink.iter().all(|c| c.data.is_empty()));
    }

    #[test]
    fn per_view_role_filter_and_top_n() {
        let mut sink: Vec<RenderedChart> = Vec::new();
        let options = DashboardOptions {
            operating_systems: TopListOptions {
                dev_type: "Developer".to_string(),
                top_n: 1,
            },
            ..Default::default()
        };
        dashboard().refresh(&options, &mut sink).unwrap();
        let os = &sink[2];
        assert_eq!(os.kind, ChartKind::OperatingSystems);
        assert_eq!(os.data.labels, vec!["Linux"]);
        assert_eq!(sink[3].data.len(), 3);
    }

    #[test]
    fn zero_top_n_is_a_configuration_error() {
        let mut sink: Vec<RenderedChart> = Vec::new();
        let options = DashboardOptions {
            communication_tools: TopListOptions {
                dev_type: String::new(),
                top_n: 0,
            },
            ..Default::default()
        };
        let err = dashboard().refresh(&options, &mut sink).unwrap_err();
        assert!(err.to_string().contains("communication_tools.top_n must be > 0"));
        assert!(sink.is_empty());
    }

    #[test]
    fn country_options_in_first_seen_order() {
        assert_eq!(dashboard().country_options(), vec!["France", "Switzerland"]);
    }
}
