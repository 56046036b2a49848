//! Shared load-and-chart pipeline used by every front-end.
//!
//! open file -> parse rows -> optional row window -> chart description
//!
//! The ASCII, SVG and interactive front-ends only differ in how they draw the
//! resulting `ChartSpec`.

use tracing::debug;

use crate::chart::ChartSpec;
use crate::domain::{ChartConfig, LatencySeries};
use crate::error::AppError;
use crate::io::ingest::load_latency_csv;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: LatencySeries,
    pub chart: ChartSpec,
}

/// Load the input file and apply the configured row limit.
///
/// A header-only file, or a limit that leaves no rows, is an error: there is
/// nothing to chart.
pub fn load_series(config: &ChartConfig) -> Result<LatencySeries, AppError> {
    let mut series = load_latency_csv(&config.input)?;
    if series.is_empty() {
        return Err(AppError::empty(format!(
            "No data rows in '{}' (only a header line).",
            config.input.display()
        )));
    }

    if let Some(limit) = config.limit {
        debug!(limit, rows = series.len(), "applying row limit");
        series.truncate(limit);
        if series.is_empty() {
            return Err(AppError::empty(format!(
                "--limit {limit} leaves no data rows to chart."
            )));
        }
    }
    Ok(series)
}

/// Execute the full pipeline.
pub fn run_chart(config: &ChartConfig) -> Result<RunOutput, AppError> {
    let series = load_series(config)?;
    let chart = ChartSpec::from_series(&series, config);
    Ok(RunOutput { series, chart })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_input(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn limit_windows_the_series() {
        let file = write_input("a,b,c\n0,1,2\n1,2,3\n2,3,4\n3,4,5\n");
        let config = ChartConfig {
            input: file.path().to_path_buf(),
            limit: Some(2),
            ..ChartConfig::default()
        };
        let run = run_chart(&config).unwrap();
        assert_eq!(run.series.len(), 2);
        assert_eq!(run.chart.point_count(), 2);
        assert_eq!(run.chart.x_bounds, [0.0, 1.0]);
    }

    #[test]
    fn zero_limit_is_empty_error() {
        let file = write_input("a,b,c\n0,1,2\n1,2,3\n");
        let config = ChartConfig {
            input: file.path().to_path_buf(),
            limit: Some(0),
            ..ChartConfig::default()
        };
        let err = run_chart(&config).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_EMPTY);
        assert_eq!(load_series(&config).unwrap_err().exit_code(), crate::error::EXIT_EMPTY);
    }

    #[test]
    fn header_only_input_is_empty_error() {
        let file = write_input("access,mean,p95\n");
        let config = ChartConfig {
            input: file.path().to_path_buf(),
            ..ChartConfig::default()
        };
        let err = run_chart(&config).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_EMPTY);
    }
}
