//! Plotters-powered latency chart widget for Ratatui.
//!
//! Plotters gives us axis, tick and label rendering for free; the output is
//! drawn into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{ChartSpec, Rgb};

/// Render-only view over a prepared `ChartSpec`.
pub struct LatencyPlottersChart<'a> {
    pub spec: &'a ChartSpec,
}

impl<'a> Widget for LatencyPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let spec = self.spec;
        let [x0, x1] = spec.x_bounds;
        let [y0, y1] = spec.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(spec.x_label.as_str())
                .y_desc(spec.y_label.as_str())
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for line in &spec.lines {
                chart.draw_series(LineSeries::new(
                    line.points.iter().copied(),
                    &terminal_color(line.color),
                ))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Pure blue is unreadable on dark terminals; lift it towards cyan.
pub fn terminal_color(c: Rgb) -> RGBColor {
    match c {
        Rgb(0, 0, 255) => RGBColor(80, 140, 255),
        Rgb(r, g, b) => RGBColor(r, g, b),
    }
}
