//! CSV ingest.
//!
//! Turns a latency measurement file into a `LatencySeries`.
//!
//! Input format:
//! - first line is a header and is always skipped (its contents are not checked)
//! - every other non-blank line is `access_bin,mean_latency_us,p95_latency_us`
//! - fields are trimmed; columns after the third are ignored
//!
//! Ingest is strict: the first malformed row aborts the whole load with its
//! line number. A chart drawn from a silently filtered subset would be misleading.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{LatencyRow, LatencySeries};
use crate::error::AppError;

/// Number of leading columns every data row must provide.
const REQUIRED_FIELDS: usize = 3;

/// Open `path` and parse it into a `LatencySeries`.
///
/// The file handle is dropped as soon as reading completes.
pub fn load_latency_csv(path: &Path) -> Result<LatencySeries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open '{}': {e}", path.display())))?;

    let series = read_latency_series(file)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", path.display())))?;

    info!(path = %path.display(), rows = series.len(), "loaded latency data");
    Ok(series)
}

/// Parse latency rows from any reader (header line first).
///
/// The header is consumed as raw bytes up to the first `\n`, so quotes or
/// invalid UTF-8 in it cannot affect how the data rows are read.
pub fn read_latency_series<R: Read>(reader: R) -> Result<LatencySeries, AppError> {
    let mut reader = BufReader::new(reader);

    let mut header = Vec::new();
    reader
        .read_until(b'\n', &mut header)
        .map_err(|e| AppError::input(format!("Failed to read header line: {e}")))?;
    debug!(header = %String::from_utf8_lossy(&header).trim_end(), "skipping header");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut series = LatencySeries::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| AppError::input(format!("CSV parse error: {e}")))?;
        let line = record_line(&record, idx);

        let row = parse_row(&record).map_err(|msg| AppError::input(format!("line {line}: {msg}")))?;
        series.push(row);
    }

    debug!(rows = series.len(), "parsed data rows");
    Ok(series)
}

/// 1-based line number of `record` in the whole input, header included.
///
/// The csv reader only sees the data after the header, so its own positions
/// are shifted by one. Without a position, assume no blank lines were skipped.
fn record_line(record: &StringRecord, idx: usize) -> u64 {
    record
        .position()
        .map(|p| p.line() + 1)
        .unwrap_or(idx as u64 + 2)
}

/// Parse a single data record.
pub fn parse_row(record: &StringRecord) -> Result<LatencyRow, String> {
    if record.len() < REQUIRED_FIELDS {
        return Err(format!(
            "expected {REQUIRED_FIELDS} fields (access_bin, mean, p95), found {}",
            record.len()
        ));
    }

    Ok(LatencyRow {
        access_bin: parse_access_bin(field(record, 0))?,
        mean_latency_us: parse_latency(field(record, 1), "mean latency")?,
        p95_latency_us: parse_latency(field(record, 2), "p95 latency")?,
    })
}

/// Parse an access bin index (`"3"` → `3`).
pub fn parse_access_bin(s: &str) -> Result<i64, String> {
    s.trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid access bin '{s}': {e}"))
}

/// Parse a latency value in microseconds (`"1.25"` → `1.25`).
///
/// Non-finite values parse (`"nan"`, `"inf"`) but are rejected: they cannot be
/// placed on a chart axis.
pub fn parse_latency(s: &str, what: &str) -> Result<f64, String> {
    let v = s
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid {what} '{s}': {e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite {what} '{s}'"))
    }
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}
