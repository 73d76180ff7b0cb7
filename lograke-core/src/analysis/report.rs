use crate::analysis::aggregate::{EndpointStats, EndpointTable};
use crate::analysis::error::AnalysisError;
use crate::analysis::stats::{max, mean, median, round3, sum};
use crate::analysis::types::ReportRow;

/// Rank endpoints by total time spent, slowest first, and keep at most
/// `max_rows` of them. Endpoints with equal totals keep first-seen order.
///
/// Percentages are relative to the records in `table`, i.e. parsed lines only.
pub fn build_report(
    table: &EndpointTable,
    max_rows: usize,
) -> Result<Vec<ReportRow>, AnalysisError> {
    let total_records = table.total_records();
    let total_time = table.total_time();

    if total_records == 0 || total_time <= 0.0 {
        return Err(AnalysisError::NoData);
    }

    let mut ranked: Vec<(&str, &EndpointStats)> = table.iter().collect();
    // sort_by is stable, which preserves first-seen order on ties
    ranked.sort_by(|(_, a), (_, b)| b.time_sum.total_cmp(&a.time_sum));

    Ok(ranked
        .into_iter()
        .take(max_rows)
        .map(|(url, stats)| report_row(url, stats, total_records, total_time))
        .collect())
}

fn report_row(url: &str, stats: &EndpointStats, total_records: u64, total_time: f64) -> ReportRow {
    let samples = &stats.samples;
    let time_sum = round3(sum(samples));

    ReportRow {
        url: url.to_string(),
        count: stats.count,
        count_perc: round3(stats.count as f64 * 100.0 / total_records as f64),
        time_sum,
        time_perc: round3(time_sum * 100.0 / total_time),
        time_avg: round3(mean(samples).unwrap_or_default()),
        time_max: round3(max(samples).unwrap_or_default()),
        time_med: round3(median(samples).unwrap_or_default()),
    }
}
