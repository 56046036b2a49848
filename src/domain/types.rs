//! Shared domain types.
//!
//! These types are intentionally kept small so they can be:
//!
//! - filled by the CSV ingest
//! - turned into chart descriptions for any backend
//! - summarized/serialized for reports

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// Default input file name, relative to the working directory.
pub const DEFAULT_INPUT: &str = "test.txt";
pub const DEFAULT_TITLE: &str = "Local Access to rdma_unordered_container";
pub const DEFAULT_X_LABEL: &str = "Request Access bin";
pub const DEFAULT_Y_LABEL: &str = "Mean Latency (us)";

/// One parsed data row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyRow {
    pub access_bin: i64,
    pub mean_latency_us: f64,
    pub p95_latency_us: f64,
}

/// The three parallel sequences collected from the input file.
///
/// The fields are private so that all three vectors always have the same
/// length; `push` and `truncate` are the only mutators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencySeries {
    access: Vec<i64>,
    mean_us: Vec<f64>,
    p95_us: Vec<f64>,
}

impl LatencySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            access: Vec::with_capacity(n),
            mean_us: Vec::with_capacity(n),
            p95_us: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, row: LatencyRow) {
        self.access.push(row.access_bin);
        self.mean_us.push(row.mean_latency_us);
        self.p95_us.push(row.p95_latency_us);
    }

    pub fn len(&self) -> usize {
        self.access.len()
    }

    pub fn is_empty(&self) -> bool {
        self.access.is_empty()
    }

    pub fn access(&self) -> &[i64] {
        &self.access
    }

    pub fn mean_us(&self) -> &[f64] {
        &self.mean_us
    }

    pub fn p95_us(&self) -> &[f64] {
        &self.p95_us
    }

    /// Iterate rows back out of the column layout.
    pub fn rows(&self) -> impl Iterator<Item = LatencyRow> + '_ {
        self.access
            .iter()
            .zip(&self.mean_us)
            .zip(&self.p95_us)
            .map(|((&access_bin, &mean_latency_us), &p95_latency_us)| LatencyRow {
                access_bin,
                mean_latency_us,
                p95_latency_us,
            })
    }

    /// Keep only the first `limit` rows.
    pub fn truncate(&mut self, limit: usize) {
        self.access.truncate(limit);
        self.mean_us.truncate(limit);
        self.p95_us.truncate(limit);
    }

    /// `(access_bin, value)` pairs for the selected metric.
    pub fn points(&self, metric: Metric) -> Vec<(f64, f64)> {
        let values = match metric {
            Metric::Mean => &self.mean_us,
            Metric::P95 => &self.p95_us,
        };
        self.access
            .iter()
            .zip(values)
            .map(|(&x, &y)| (x as f64, y))
            .collect()
    }
}

impl FromIterator<LatencyRow> for LatencySeries {
    fn from_iter<I: IntoIterator<Item = LatencyRow>>(iter: I) -> Self {
        let mut series = Self::new();
        for row in iter {
            series.push(row);
        }
        series
    }
}

/// A single plottable metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Mean,
    P95,
}

impl Metric {
    pub fn legend_label(self) -> &'static str {
        match self {
            Metric::Mean => "baseline",
            Metric::P95 => "95th percentile",
        }
    }
}

/// Which line(s) to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSelection {
    /// Mean latency only.
    #[default]
    Mean,
    /// 95th-percentile latency only.
    P95,
    /// Both lines on the same axes.
    Both,
}

impl SeriesSelection {
    pub fn metrics(self) -> &'static [Metric] {
        match self {
            SeriesSelection::Mean => &[Metric::Mean],
            SeriesSelection::P95 => &[Metric::P95],
            SeriesSelection::Both => &[Metric::Mean, Metric::P95],
        }
    }

    /// Cycle order used by the interactive window.
    pub fn next(self) -> Self {
        match self {
            SeriesSelection::Mean => SeriesSelection::P95,
            SeriesSelection::P95 => SeriesSelection::Both,
            SeriesSelection::Both => SeriesSelection::Mean,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SeriesSelection::Mean => "mean",
            SeriesSelection::P95 => "p95",
            SeriesSelection::Both => "mean + p95",
        }
    }
}

/// Resolved settings for one run (CLI flags → config).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub input: PathBuf,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: SeriesSelection,
    /// Keep only the first N data rows.
    pub limit: Option<usize>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            title: DEFAULT_TITLE.to_string(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            series: SeriesSelection::Mean,
            limit: None,
        }
    }
}
