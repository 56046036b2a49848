//! Dataset summary: counts, bin range and latency statistics.
//!
//! Formatting lives here so output changes stay localized.

use std::path::Path;

use serde::Serialize;

use crate::domain::LatencySeries;
use crate::error::AppError;

/// Min/max/average of one latency column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Summary of a loaded latency file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub rows: usize,
    pub access_min: i64,
    pub access_max: i64,
    pub mean_latency_us: ColumnStats,
    pub p95_latency_us: ColumnStats,
}

/// Summarize `series`; `None` when it has no rows.
pub fn summarize(series: &LatencySeries) -> Option<SeriesSummary> {
    let access_min = *series.access().iter().min()?;
    let access_max = *series.access().iter().max()?;

    Some(SeriesSummary {
        rows: series.len(),
        access_min,
        access_max,
        mean_latency_us: column_stats(series.mean_us())?,
        p95_latency_us: column_stats(series.p95_us())?,
    })
}

fn column_stats(values: &[f64]) -> Option<ColumnStats> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Running mean: a plain sum overflows for large finite inputs.
    let avg = values
        .iter()
        .enumerate()
        .fold(0.0, |avg, (i, &v)| avg + (v - avg) / (i + 1) as f64);
    Some(ColumnStats { min, max, avg })
}

/// Human-readable summary.
pub fn format_summary(summary: &SeriesSummary, input: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== latplot - {} ===\n", input.display()));
    out.push_str(&format!("Rows: {}\n", summary.rows));
    out.push_str(&format!(
        "Access bins: [{}, {}]\n",
        summary.access_min, summary.access_max
    ));
    out.push_str(&format_column("Mean latency (us)", &summary.mean_latency_us));
    out.push_str(&format_column("p95 latency (us)", &summary.p95_latency_us));
    out
}

fn format_column(name: &str, stats: &ColumnStats) -> String {
    format!(
        "{name:<18} min={:>10.3} max={:>10.3} avg={:>10.3}\n",
        stats.min, stats.max, stats.avg
    )
}

/// Pretty JSON summary for scripting.
pub fn summary_json(summary: &SeriesSummary) -> Result<String, AppError> {
    serde_json::to_string_pretty(summary)
        .map_err(|e| AppError::render(format!("Failed to serialize summary: {e}")))
}
