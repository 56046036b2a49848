//! Command-line parsing for the latency chart tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! ingest and rendering code; `app` turns these structs into a `ChartConfig`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{DEFAULT_INPUT, DEFAULT_TITLE, DEFAULT_X_LABEL, DEFAULT_Y_LABEL, SeriesSelection};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "latplot", version, about = "Plot mean latency per request-access bin")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive chart window.
    Show(ChartArgs),
    /// Print the chart as ASCII to stdout.
    Plot(PlotArgs),
    /// Render the chart to an SVG file.
    Export(ExportArgs),
    /// Print row count and latency statistics.
    Summary(SummaryArgs),
}

/// Options shared by every chart-producing command.
#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Latency CSV (header line, then `access_bin,mean_us,p95_us` rows).
    #[arg(short = 'f', long, env = "LATPLOT_FILE", default_value = DEFAULT_INPUT)]
    pub file: PathBuf,

    /// Which line(s) to draw.
    #[arg(short, long, value_enum, default_value_t = SeriesSelection::Mean)]
    pub series: SeriesSelection,

    /// Only use the first N data rows.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Chart title.
    #[arg(long, env = "LATPLOT_TITLE", default_value = DEFAULT_TITLE)]
    pub title: String,

    /// X axis label.
    #[arg(long, default_value = DEFAULT_X_LABEL)]
    pub x_label: String,

    /// Y axis label.
    #[arg(long, default_value = DEFAULT_Y_LABEL)]
    pub y_label: String,
}

/// Options for the ASCII plot.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for SVG export.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Output SVG path.
    #[arg(short, long, value_name = "SVG")]
    pub output: PathBuf,

    /// Image width (pixels).
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Image height (pixels).
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

/// Options for the summary report.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    /// Latency CSV.
    #[arg(short = 'f', long, env = "LATPLOT_FILE", default_value = DEFAULT_INPUT)]
    pub file: PathBuf,

    /// Only use the first N data rows.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plot_flags_parse() {
        let cli = Cli::try_parse_from([
            "latplot", "plot", "-f", "lat.csv", "--series", "both", "-n", "1000", "--width", "80",
        ])
        .unwrap();
        let Command::Plot(args) = cli.command else {
            panic!("expected plot subcommand");
        };
        assert_eq!(args.chart.file, PathBuf::from("lat.csv"));
        assert_eq!(args.chart.series, SeriesSelection::Both);
        assert_eq!(args.chart.limit, Some(1000));
        assert_eq!(args.width, 80);
        assert_eq!(args.height, 25);
    }
}
