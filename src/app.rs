//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads an optional `.env` file
//! - parses CLI arguments
//! - sets up logging
//! - dispatches to the interactive window, ASCII plot, SVG export or summary

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{ChartArgs, Command, ExportArgs, PlotArgs, SummaryArgs};
use crate::domain::ChartConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `latplot` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; a missing file is not an error.
    let dotenv = dotenvy::dotenv().ok();

    // `latplot` and `latplot -f data.csv` behave like `latplot show ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.verbose);
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "loaded .env");
    }

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Plot(args) => handle_plot(args),
        Command::Export(args) => handle_export(args),
        Command::Summary(args) => handle_summary(args),
    }
}

/// Install the stderr fmt subscriber.
///
/// `RUST_LOG` wins; otherwise the level comes from the `-v` count.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_show(args: ChartArgs) -> Result<(), AppError> {
    let config = chart_config_from_args(&args);
    crate::tui::run(config)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = chart_config_from_args(&args.chart);
    let run = pipeline::run_chart(&config)?;

    let plot = crate::plot::render_ascii_chart(&run.chart, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let config = chart_config_from_args(&args.chart);
    let run = pipeline::run_chart(&config)?;

    crate::io::export::write_chart_svg(&args.output, &run.chart, args.width, args.height)?;
    info!(rows = run.series.len(), "export complete");
    println!("Wrote {}", args.output.display());
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = ChartConfig {
        input: args.file.clone(),
        limit: args.limit,
        ..ChartConfig::default()
    };
    let series = pipeline::load_series(&config)?;
    let summary = crate::report::summarize(&series)
        .ok_or_else(|| AppError::empty("No data rows to summarize."))?;

    if args.json {
        println!("{}", crate::report::summary_json(&summary)?);
    } else {
        print!("{}", crate::report::format_summary(&summary, &config.input));
    }
    Ok(())
}

pub fn chart_config_from_args(args: &ChartArgs) -> ChartConfig {
    ChartConfig {
        input: args.file.clone(),
        title: args.title.clone(),
        x_label: args.x_label.clone(),
        y_label: args.y_label.clone(),
        series: args.series,
        limit: args.limit,
    }
}

/// Rewrite argv so `latplot` defaults to `latplot show`.
///
/// Rules:
/// - `latplot`                     -> `latplot show`
/// - `latplot -f data.csv ...`     -> `latplot show -f data.csv ...`
/// - `latplot --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "plot" | "export" | "summary");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "show flags".
    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
