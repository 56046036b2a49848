//! Ratatui-based chart window.
//!
//! Shows the latency chart full-screen with a legend header and a status
//! footer. Keys: `s` cycles the drawn series, `r` reloads the file, `e`
//! exports an SVG, `q`/`Esc` quits.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};
use tracing::{info, warn};

use crate::app::pipeline::{self, RunOutput};
use crate::chart::ChartSpec;
use crate::domain::ChartConfig;
use crate::error::AppError;
use crate::io::export::{write_chart_svg, DEFAULT_SVG_SIZE};

mod plotters_chart;

use plotters_chart::{terminal_color, LatencyPlottersChart};

/// Load the data, then open the window.
///
/// Loading happens before the terminal switches modes so input errors print
/// normally instead of flashing inside the alternate screen.
pub fn run(config: ChartConfig) -> Result<(), AppError> {
    let run = pipeline::run_chart(&config)?;
    info!(rows = run.series.len(), "opening chart window");

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::render(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, run);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::render(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::render(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: ChartConfig,
    run: RunOutput,
    status: String,
}

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Quit,
    Redraw,
    Ignore,
}

impl App {
    fn new(config: ChartConfig, run: RunOutput) -> Self {
        let status = format!("{} rows from {}", run.series.len(), config.input.display());
        Self { config, run, status }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::render(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::render(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::render(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match self.handle_key(key.code) {
                        KeyOutcome::Quit => break,
                        KeyOutcome::Redraw => needs_redraw = true,
                        KeyOutcome::Ignore => {}
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> KeyOutcome {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('s') => {
                self.config.series = self.config.series.next();
                self.run.chart = ChartSpec::from_series(&self.run.series, &self.config);
                self.status = format!("series: {}", self.config.series.display_name());
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('e') => self.export(),
            _ => return KeyOutcome::Ignore,
        }
        KeyOutcome::Redraw
    }

    fn reload(&mut self) {
        match pipeline::run_chart(&self.config) {
            Ok(run) => {
                self.status = format!("reloaded {} rows", run.series.len());
                self.run = run;
            }
            Err(err) => {
                warn!(%err, "reload failed");
                self.status = format!("Reload failed: {err}");
            }
        }
    }

    fn export(&mut self) {
        self.export_to(&default_export_path());
    }

    fn export_to(&mut self, path: &Path) {
        let (w, h) = DEFAULT_SVG_SIZE;
        self.status = match write_chart_svg(path, &self.run.chart, w, h) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => {
                warn!(%err, path = %path.display(), "export failed");
                format!("Export failed: {err}")
            }
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chart = &self.run.chart;

        let mut legend = vec![Span::styled("legend: ", Style::default().fg(Color::Gray))];
        for line in &chart.lines {
            let c = terminal_color(line.color);
            legend.push(Span::styled("── ", Style::default().fg(Color::Rgb(c.0, c.1, c.2))));
            legend.push(Span::raw(format!("{}  ", line.label)));
        }

        let lines = vec![
            Line::from(Span::styled(
                chart.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(legend).alignment(Alignment::Center),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.config.input.display()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        frame.render_widget(LatencyPlottersChart { spec: &self.run.chart }, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "s series  r reload  e export svg  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// `latency_YYYYmmdd_HHMMSS.svg` in the working directory.
fn default_export_path() -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("latency_{ts}.svg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LatencyRow, LatencySeries, SeriesSelection};

    fn app() -> App {
        let series: LatencySeries = (0..4)
            .map(|i| LatencyRow {
                access_bin: i,
                mean_latency_us: i as f64,
                p95_latency_us: 2.0 * i as f64,
            })
            .collect();
        let config = ChartConfig::default();
        let chart = ChartSpec::from_series(&series, &config);
        App::new(config, RunOutput { series, chart })
    }

    #[test]
    fn series_key_rebuilds_chart() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('s')), KeyOutcome::Redraw);
        assert_eq!(app.config.series, SeriesSelection::P95);
        assert_eq!(app.run.chart.lines.len(), 1);
        assert_eq!(app.run.chart.lines[0].label, "95th percentile");

        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.run.chart.lines.len(), 2);
        assert_eq!(app.status, "series: mean + p95");
    }

    #[test]
    fn quit_and_unknown_keys() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('q')), KeyOutcome::Quit);
        assert_eq!(app.handle_key(KeyCode::Esc), KeyOutcome::Quit);
        assert_eq!(app.handle_key(KeyCode::Char('z')), KeyOutcome::Ignore);
    }

    #[test]
    fn reload_failure_is_reported_in_status() {
        let mut app = app();
        app.config.input = PathBuf::from("/nonexistent/latency/test.txt");
        app.handle_key(KeyCode::Char('r'));
        assert!(app.status.starts_with("Reload failed:"), "{}", app.status);
        // Previous data stays on screen.
        assert_eq!(app.run.series.len(), 4);
    }

    #[test]
    fn export_failure_is_reported_in_status() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        app.export_to(&dir.path().join("missing").join("chart.svg"));
        assert!(app.status.starts_with("Export failed:"), "{}", app.status);

        let path = dir.path().join("chart.svg");
        app.export_to(&path);
        assert!(app.status.starts_with("Wrote "), "{}", app.status);
        assert!(path.exists());
    }

    #[test]
    fn export_name_is_timestamped_svg() {
        let name = default_export_path().display().to_string();
        assert!(name.starts_with("latency_") && name.ends_with(".svg"), "{name}");
    }
}
