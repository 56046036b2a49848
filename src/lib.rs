//! `latency-plot` library crate.
//!
//! The binary (`latplot`) is a thin wrapper around this library so that:
//!
//! - ingest and chart prep are testable without spawning processes
//! - every front-end (window, ASCII, SVG) shares one pipeline

pub mod app;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
