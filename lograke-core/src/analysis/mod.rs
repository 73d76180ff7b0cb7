//! Access Log Analysis
//!
//! Turns one access-log file into a ranked table of endpoint latencies.
//!
//! Every line is matched against the fixed `ui_short` grammar. Lines that match
//! contribute their request path and request time; lines that don't are counted
//! and skipped. Once the file is exhausted, a configurable error-rate limit
//! decides whether the run is trustworthy enough to report on at all.
//!
//! The overall data processing architecture is:
//!
//! ```text
//! log file (plain or .gz)
//!        ↓
//! LogReader (parse_bytes per line)
//!        ↓
//! ParsedRecord
//!        ↓
//! EndpointTable
//!        ↓
//! build_report
//!        ↓
//! Vec<ReportRow>
//! ```

mod aggregate;
mod error;
mod parse;
mod reader;
mod report;
mod stats;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{EndpointStats, EndpointTable};
pub use error::AnalysisError;
pub use parse::{parse_bytes, parse_line};
pub use reader::{Compression, LogReader, check_error_limit, open_log};
pub use report::build_report;
pub use types::{ParsedRecord, ReportRow, RunTotals};

use std::path::Path;

/// Result of a completed analysis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub rows: Vec<ReportRow>,
    pub totals: RunTotals,
}

/// Read, aggregate and rank a single log file.
///
/// Fails with [`AnalysisError::ErrorLimitExceeded`] when the share of unparsed
/// lines is above `errors_limit`, and with [`AnalysisError::NoData`] when no
/// line parsed at all.
pub fn analyze_log(
    path: &Path,
    errors_limit: Option<f64>,
    max_report_size: usize,
) -> Result<Analysis, AnalysisError> {
    let mut reader = LogReader::open(path)?;
    let mut table = EndpointTable::new();

    for record in reader.by_ref() {
        table.record(record?);
    }

    let totals = reader.finish(errors_limit)?;

    tracing::info!(
        lines = totals.total_records,
        parsed = totals.parsed(),
        unparsed = totals.total_errors,
        endpoints = table.len(),
        "log read"
    );

    let rows = build_report(&table, max_report_size)?;

    Ok(Analysis { rows, totals })
}
