use crate::analysis::stats::{median, round3};
use crate::analysis::tests::test_helpers::{log_line, record};
use crate::analysis::{AnalysisError, EndpointTable, ReportRow, analyze_log, build_report};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn table_of(records: &[(&str, f64)]) -> EndpointTable {
    records.iter().map(|(e, l)| record(e, *l)).collect()
}

fn urls(rows: &[ReportRow]) -> Vec<&str> {
    rows.iter().map(|r| r.url.as_str()).collect()
}

//-----------------------------------------------------------------------------
// Ranking
//-----------------------------------------------------------------------------
#[test]
fn ranks_by_total_time_descending() {
    // Arrange
    let table = table_of(&[("/a", 0.1), ("/a", 0.3), ("/b", 1.0)]);

    // Act
    let rows = build_report(&table, 10).unwrap();

    // Assert
    assert_eq!(urls(&rows), vec!["/b", "/a"]);
    assert_eq!(rows[0].time_sum, 1.0);
    assert_eq!(rows[1].time_sum, 0.4);
}

#[test]
fn ties_keep_first_seen_order() {
    let table = table_of(&[("/c", 0.5), ("/a", 0.5), ("/big", 2.0), ("/b", 0.5)]);

    let rows = build_report(&table, 10).unwrap();

    assert_eq!(urls(&rows), vec!["/big", "/c", "/a", "/b"]);
}

#[test]
fn rows_are_sorted_descending() {
    let records: Vec<_> = (0..40)
        .map(|i| (format!("/e{}", i % 9), ((i * 37) % 11) as f64 / 10.0))
        .collect();
    let table: EndpointTable = records.iter().map(|(e, l)| record(e, *l)).collect();

    let rows = build_report(&table, 100).unwrap();

    assert!(rows.windows(2).all(|w| w[0].time_sum >= w[1].time_sum));
}

//-----------------------------------------------------------------------------
// Truncation
//-----------------------------------------------------------------------------
#[test]
fn max_report_size_one_returns_single_row() {
    let table = table_of(&[("/a", 0.1), ("/b", 0.2), ("/c", 0.3)]);

    let rows = build_report(&table, 1).unwrap();

    assert_eq!(urls(&rows), vec!["/c"]);
}

#[test]
fn max_report_size_equal_to_endpoints_returns_all() {
    let table = table_of(&[("/a", 0.1), ("/b", 0.2), ("/c", 0.3)]);

    let rows = build_report(&table, 3).unwrap();

    assert_eq!(rows.len(), 3);
}

#[test]
fn max_report_size_larger_than_endpoints_returns_all() {
    let table = table_of(&[("/a", 0.1), ("/b", 0.2)]);

    let rows = build_report(&table, 1000).unwrap();

    assert_eq!(rows.len(), 2);
}

//-----------------------------------------------------------------------------
// Derived fields
//-----------------------------------------------------------------------------
#[test]
fn derives_all_fields() {
    // Arrange
    let table = table_of(&[("/a", 0.1), ("/a", 0.3), ("/b", 1.0)]);

    // Act
    let rows = build_report(&table, 10).unwrap();

    // Assert
    assert_eq!(
        rows,
        vec![
            ReportRow {
                url: "/b".to_string(),
                count: 1,
                count_perc: 33.333,
                time_sum: 1.0,
                time_perc: 71.429,
                time_avg: 1.0,
                time_max: 1.0,
                time_med: 1.0,
            },
            ReportRow {
                url: "/a".to_string(),
                count: 2,
                count_perc: 66.667,
                time_sum: 0.4,
                time_perc: 28.571,
                time_avg: 0.2,
                time_max: 0.3,
                time_med: 0.2,
            },
        ]
    );
}

#[test]
fn time_sum_is_rounded_sum_of_samples() {
    let table = table_of(&[("/a", 0.1234), ("/a", 0.0004), ("/a", 1.11111)]);

    let rows = build_report(&table, 10).unwrap();

    assert_eq!(rows[0].time_sum, round3(0.1234 + 0.0004 + 1.11111));
    assert_eq!(rows[0].time_sum, 1.235);
}

#[test]
fn median_of_odd_and_even_sets() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(median(&[]), None);
}

#[test]
fn rounding_is_to_three_decimals() {
    assert_eq!(round3(0.12345), 0.123);
    assert_eq!(round3(2.0 / 3.0), 0.667);
    assert_eq!(round3(100.0), 100.0);
}

#[test]
fn rounding_uses_the_stored_binary_value() {
    // 1.0005 and 0.0045 are stored just below the halfway point.
    assert_eq!(round3(1.0005), 1.0);
    assert_eq!(round3(0.0045), 0.004);
    // 0.0625 is an exact tie and goes to the even digit.
    assert_eq!(round3(0.0625), 0.062);
    assert_eq!(round3(-0.0625), -0.062);
}

#[test]
fn halfway_median_rounds_down_to_stored_value() {
    // Arrange
    let table = table_of(&[("/a", 0.0), ("/a", 0.009)]);

    // Act
    let rows = build_report(&table, 10).unwrap();

    // Assert
    assert_eq!(rows[0].time_med, 0.004);
    assert_eq!(rows[0].time_avg, 0.004);
    assert_eq!(rows[0].time_max, 0.009);
}

//-----------------------------------------------------------------------------
// No data
//-----------------------------------------------------------------------------
#[test]
fn empty_table_is_no_data() {
    let err = build_report(&EndpointTable::new(), 10).unwrap_err();

    assert!(matches!(err, AnalysisError::NoData));
}

#[test]
fn zero_total_time_is_no_data() {
    let table = table_of(&[("/a", 0.0), ("/b", 0.0)]);

    let err = build_report(&table, 10).unwrap_err();

    assert!(matches!(err, AnalysisError::NoData));
}

//-----------------------------------------------------------------------------
// Whole file
//-----------------------------------------------------------------------------
#[test]
fn nine_good_lines_and_one_bad() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nginx-access-ui.log-20170630");
    let mut lines: Vec<_> = (0..9)
        .map(|_| log_line("/api/v2/banner/1", "0.200"))
        .collect();
    lines.insert(4, "this line is malformed".to_string());
    fs::write(&path, lines.join("\n")).unwrap();

    // Act
    let analysis = analyze_log(&path, Some(0.5), 1000).unwrap();

    // Assert
    assert_eq!(analysis.totals.total_records, 10);
    assert_eq!(analysis.totals.total_errors, 1);
    assert_eq!(
        analysis.rows,
        vec![ReportRow {
            url: "/api/v2/banner/1".to_string(),
            count: 9,
            count_perc: 100.0,
            time_sum: 1.8,
            time_perc: 100.0,
            time_avg: 0.2,
            time_max: 0.2,
            time_med: 0.2,
        }]
    );
}

#[test]
fn error_limit_aborts_whole_analysis() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nginx-access-ui.log-20170630");
    fs::write(&path, format!("{}\nbad\nbad\n", log_line("/a", "0.100"))).unwrap();

    let err = analyze_log(&path, Some(0.5), 1000).unwrap_err();

    assert!(matches!(err, AnalysisError::ErrorLimitExceeded { .. }));
}

#[test]
fn analysis_is_idempotent() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nginx-access-ui.log-20170630");
    let contents: Vec<_> = (0..30)
        .map(|i| log_line(&format!("/e{}", i % 4), &format!("{}.{:03}", i % 3, i * 7)))
        .collect();
    fs::write(&path, contents.join("\n")).unwrap();

    // Act
    let first = analyze_log(&path, None, 10).unwrap();
    let second = analyze_log(&path, None, 10).unwrap();

    // Assert
    assert_eq!(first, second);
    for (a, b) in first.rows.iter().zip(&second.rows) {
        assert_eq!(a.time_sum.to_bits(), b.time_sum.to_bits());
        assert_eq!(a.time_med.to_bits(), b.time_med.to_bits());
    }
}
