use serde::Serialize;

/// One successfully parsed access-log line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub endpoint: String,
    /// Request processing time in seconds.
    pub latency: f64,
}

/// Line counters for a single run. `total_records` counts every line read,
/// including the ones that failed to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub total_records: u64,
    pub total_errors: u64,
}

impl RunTotals {
    pub fn parsed(&self) -> u64 {
        self.total_records - self.total_errors
    }

    /// Share of lines that failed to parse, `None` when nothing was read.
    pub fn error_rate(&self) -> Option<f64> {
        (self.total_records > 0).then(|| self.total_errors as f64 / self.total_records as f64)
    }
}

/// One ranked line of the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub count: u64,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}
