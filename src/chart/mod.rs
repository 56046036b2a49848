//! Backend-independent chart description.
//!
//! A `ChartSpec` holds everything a renderer needs: labels, line series and
//! axis bounds. All data prep happens here so the ASCII, SVG and terminal
//! renderers only draw.

use crate::domain::{ChartConfig, LatencySeries, Metric};

/// RGB colour, kept free of any backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const RED: Rgb = Rgb(255, 0, 0);

/// One line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub metric: Metric,
    pub label: &'static str,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw the latency chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<LineSpec>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartSpec {
    /// Build the chart for the metrics selected in `config`.
    pub fn from_series(series: &LatencySeries, config: &ChartConfig) -> Self {
        let lines: Vec<LineSpec> = config
            .series
            .metrics()
            .iter()
            .map(|&metric| LineSpec {
                metric,
                label: metric.legend_label(),
                color: metric_color(metric),
                points: series.points(metric),
            })
            .collect();

        let x_bounds = bounds(lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)), 0.0);
        let y_bounds = bounds(lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)), 0.05);

        Self {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            lines,
            x_bounds,
            y_bounds,
        }
    }

    pub fn point_count(&self) -> usize {
        self.lines.first().map(|l| l.points.len()).unwrap_or(0)
    }
}

fn metric_color(metric: Metric) -> Rgb {
    match metric {
        Metric::Mean => BLUE,
        Metric::P95 => RED,
    }
}

/// Largest magnitude a bound may take. Keeping both ends within
/// `±f64::MAX / 4` keeps `hi - lo` and the padded range finite, which the
/// Plotters tick search needs to terminate.
const BOUND_LIMIT: f64 = f64::MAX / 4.0;

/// Min/max of `values`, padded by `frac` of the span.
///
/// Always returns a non-empty finite range with a finite span: no data falls
/// back to `[0, 1]` and a single value is widened by 0.5 (or 5% of its
/// magnitude, whichever is larger) on each side.
/// Extremes beyond `BOUND_LIMIT` are clamped; such points draw off-chart.
fn bounds(values: impl Iterator<Item = f64>, frac: f64) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }

    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let lo = lo.clamp(-BOUND_LIMIT, BOUND_LIMIT);
    let hi = hi.clamp(-BOUND_LIMIT, BOUND_LIMIT);
    if hi <= lo {
        // 0.5 vanishes below the precision of large values.
        let widen = (lo.abs() * 0.05).max(0.5);
        return [lo - widen, hi + widen];
    }

    let pad = (hi - lo) * frac.clamp(0.0, 0.5);
    [lo - pad, hi + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LatencyRow, SeriesSelection};

    fn series() -> LatencySeries {
        [(0, 10.0, 20.0), (1, 12.0, 30.0), (2, 11.0, 25.0)]
            .into_iter()
            .map(|(access_bin, mean, p95)| LatencyRow {
                access_bin,
                mean_latency_us: mean,
                p95_latency_us: p95,
            })
            .collect()
    }

    #[test]
    fn mean_only_chart_uses_defaults() {
        let spec = ChartSpec::from_series(&series(), &ChartConfig::default());
        assert_eq!(spec.title, "Local Access to rdma_unordered_container");
        assert_eq!(spec.x_label, "Request Access bin");
        assert_eq!(spec.y_label, "Mean Latency (us)");
        assert_eq!(spec.lines.len(), 1);
        assert_eq!(spec.lines[0].label, "baseline");
        assert_eq!(spec.lines[0].color, BLUE);
        assert_eq!(spec.x_bounds, [0.0, 2.0]);
        assert!((spec.y_bounds[0] - 9.9).abs() < 1e-9);
        assert!((spec.y_bounds[1] - 12.1).abs() < 1e-9);
    }

    #[test]
    fn bounds_contain_every_point_for_both_lines() {
        let config = ChartConfig {
            series: SeriesSelection::Both,
            ..ChartConfig::default()
        };
        let spec = ChartSpec::from_series(&series(), &config);
        assert_eq!(spec.lines.len(), 2);
        for line in &spec.lines {
            for &(x, y) in &line.points {
                assert!(x >= spec.x_bounds[0] && x <= spec.x_bounds[1]);
                assert!(y >= spec.y_bounds[0] && y <= spec.y_bounds[1]);
            }
        }
    }

    #[test]
    fn degenerate_ranges_are_widened() {
        assert_eq!(bounds(std::iter::empty(), 0.05), [0.0, 1.0]);
        assert_eq!(bounds([3.0].into_iter(), 0.05), [2.5, 3.5]);
        let [lo, hi] = bounds([1e20, 1e20].into_iter(), 0.05);
        assert!(hi > lo);
    }

    #[test]
    fn huge_finite_values_keep_bounds_finite() {
        for values in [[-1e308, 1e308], [-f64::MAX, f64::MAX], [0.0, f64::MAX]] {
            let [lo, hi] = bounds(values.into_iter(), 0.05);
            assert!(lo.is_finite() && hi.is_finite(), "{lo} {hi}");
            assert!((hi - lo).is_finite() && hi > lo, "{lo} {hi}");
        }

        let series: LatencySeries = [(0, -1e308, 1.0), (1, 1e308, 1.0)]
            .into_iter()
            .map(|(access_bin, mean, p95)| LatencyRow {
                access_bin,
                mean_latency_us: mean,
                p95_latency_us: p95,
            })
            .collect();
        let spec = ChartSpec::from_series(&series, &ChartConfig::default());
        assert!(spec.y_bounds.iter().all(|v| v.is_finite()));
        let txt = crate::plot::render_ascii_chart(&spec, 20, 5);
        assert!(!txt.contains("inf"), "{txt}");
    }
}
