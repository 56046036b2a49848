//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - parsed input rows and the column-oriented `LatencySeries`
//! - the series selection enum (`SeriesSelection`, `Metric`)
//! - the resolved run configuration (`ChartConfig`)

pub mod types;

pub use types::*;
