//! Boundary between aggregation output and a rendering sink.
//!
//! A sink receives parallel `labels` / `values` sequences of equal length, in series order.

use serde::Serialize;

use crate::processing::{AverageSeries, FrequencySeries};

/// The dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChartKind {
    SalaryByExperience,
    SalaryByEducation,
    OperatingSystems,
    CommunicationTools,
    Currencies,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        Self::SalaryByExperience,
        Self::SalaryByEducation,
        Self::OperatingSystems,
        Self::CommunicationTools,
        Self::Currencies,
    ];

    /// Element id of the canvas the view is drawn on.
    pub fn canvas_id(self) -> &'static str {
        match self {
            Self::SalaryByExperience => "experienceChart",
            Self::SalaryByEducation => "educationChart",
            Self::OperatingSystems => "operatingSystemsChart",
            Self::CommunicationTools => "communicationToolsChart",
            Self::Currencies => "currencyChart",
        }
    }
}

/// Chart-ready data: `labels[i]` goes with `values[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<&AverageSeries> for ChartData {
    fn from(series: &AverageSeries) -> Self {
        let (labels, values) = series
            .entries
            .iter()
            .map(|e| (e.label.clone(), e.value))
            .unzip();
        Self { labels, values }
    }
}

impl From<&FrequencySeries> for ChartData {
    fn from(series: &FrequencySeries) -> Self {
        let (labels, values) = series
            .entries
            .iter()
            .map(|e| (e.label.clone(), e.count as f64))
            .unzip();
        Self { labels, values }
    }
}

/// Destination for chart data (a charting front end, a JSON writer, a test recorder, ...).
pub trait RenderSink {
    fn render(&mut self, kind: ChartKind, data: &ChartData);
}

/// One rendered view, as recorded by the `Vec` sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub data: ChartData,
}

impl RenderSink for Vec<RenderedChart> {
    fn render(&mut self, kind: ChartKind, data: &ChartData) {
        self.push(RenderedChart {
            kind,
            data: data.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{AverageEntry, FrequencyEntry};

    #[test]
    fn average_series_becomes_parallel_sequences() {
        let series = AverageSeries {
            entries: vec![
                AverageEntry {
                    label: "1-2 years".to_string(),
                    value: 31_000.0,
                },
                AverageEntry {
                    label: "5-9 years".to_string(),
                    value: 52_500.0,
                },
            ],
        };
        let data = ChartData::from(&series);
        assert_eq!(data.labels, vec!["1-2 years", "5-9 years"]);
        assert_eq!(data.values, vec![31_000.0, 52_500.0]);
    }

    #[test]
    fn frequency_series_counts_become_values() {
        let series = FrequencySeries {
            entries: vec![FrequencyEntry {
                label: "Linux".to_string(),
                count: 3,
            }],
        };
        let data = ChartData::from(&series);
        assert_eq!(data.len(), 1);
        assert_eq!(data.values, vec![3.0]);
    }

    #[test]
    fn empty_series_gives_empty_chart() {
        let data = ChartData::from(&FrequencySeries::default());
        assert!(data.is_empty());
        assert!(data.values.is_empty());
    }

    #[test]
    fn chart_data_serializes_for_front_ends() {
        let data = ChartData {
            labels: vec!["EUR".to_string()],
            values: vec![2.0],
        };
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"labels":["EUR"],"values":[2.0]}"#
        );
    }
}
