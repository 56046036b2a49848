//! Input/output helpers.
//!
//! - latency CSV ingest (`ingest`)
//! - SVG chart export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
