//! Export the latency chart to SVG.
//!
//! The SVG uses the same `ChartSpec` as the terminal renderers, so an export
//! from the interactive window matches what is on screen.

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::chart::{ChartSpec, Rgb};
use crate::error::AppError;

/// Default SVG size in pixels.
pub const DEFAULT_SVG_SIZE: (u32, u32) = (1024, 768);

/// Render `spec` to an SVG file at `path`.
pub fn write_chart_svg(path: &Path, spec: &ChartSpec, width: u32, height: u32) -> Result<(), AppError> {
    draw_svg(path, spec, (width.max(64), height.max(64))).map_err(|e| {
        AppError::input(format!("Failed to write chart SVG '{}': {e}", path.display()))
    })?;
    info!(path = %path.display(), lines = spec.lines.len(), "wrote chart svg");
    Ok(())
}

fn draw_svg(path: &Path, spec: &ChartSpec, size: (u32, u32)) -> Result<(), Box<dyn std::error::Error>> {
    let [x0, x1] = spec.x_bounds;
    let [y0, y1] = spec.y_bounds;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()?;

    for line in &spec.lines {
        let color = to_color(line.color);
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(1)))?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn to_color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartConfig, LatencyRow, LatencySeries, SeriesSelection};

    #[test]
    fn svg_contains_title_and_axis_labels() {
        let series: LatencySeries = (0..20)
            .map(|i| LatencyRow {
                access_bin: i,
                mean_latency_us: 5.0 + (i % 3) as f64,
                p95_latency_us: 9.0 + (i % 4) as f64,
            })
            .collect();
        let config = ChartConfig {
            series: SeriesSelection::Both,
            ..ChartConfig::default()
        };
        let spec = ChartSpec::from_series(&series, &config);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        write_chart_svg(&path, &spec, 640, 480).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Local Access to rdma_unordered_container"));
        assert!(svg.contains("Request Access bin"));
        assert!(svg.contains("Mean Latency (us)"));
        assert!(svg.contains("95th percentile"));
    }

    #[test]
    fn unwritable_path_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("chart.svg");
        let spec = ChartSpec::from_series(&LatencySeries::new(), &ChartConfig::default());
        let err = write_chart_svg(&path, &spec, 320, 240).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
