use crate::analysis::ReportRow;
use crate::render::{RenderError, load_template, render_template, report_path, write_report};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn row(url: &str) -> ReportRow {
    ReportRow {
        url: url.to_string(),
        count: 2,
        count_perc: 50.0,
        time_sum: 0.4,
        time_perc: 28.571,
        time_avg: 0.2,
        time_max: 0.3,
        time_med: 0.2,
    }
}

#[test]
fn report_name_uses_dotted_date() {
    let date = NaiveDate::from_ymd_opt(2017, 6, 30).unwrap();

    let path = report_path(Path::new("./reports"), date);

    assert_eq!(path, PathBuf::from("./reports/report-2017.06.30.html"));
}

#[test]
fn substitutes_table_json() {
    // Arrange
    let template = "<script>var table = $table_json;</script>";

    // Act
    let rendered = render_template(template, &[row("/a")]).unwrap();

    // Assert
    assert_eq!(
        rendered,
        "<script>var table = [{\"url\":\"/a\",\"count\":2,\"count_perc\":50.0,\"time_sum\":0.4,\
         \"time_perc\":28.571,\"time_avg\":0.2,\"time_max\":0.3,\"time_med\":0.2}];</script>"
    );
}

#[test]
fn braced_placeholder_is_substituted() {
    let rendered = render_template("x${table_json}y", &[]).unwrap();

    assert_eq!(rendered, "x[]y");
}

#[test]
fn unknown_placeholders_and_escapes_are_safe() {
    let rendered = render_template("$other ${also} $$ $table_jsonx $", &[]).unwrap();

    assert_eq!(rendered, "$other ${also} $ $table_jsonx $");
}

#[test]
fn built_in_template_has_placeholder() {
    let template = load_template(None).unwrap();

    assert!(template.contains("$table_json"));
}

#[test]
fn custom_template_is_read_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.html");
    fs::write(&path, "rows=$table_json").unwrap();

    let template = load_template(Some(&path)).unwrap();

    assert_eq!(render_template(&template, &[]).unwrap(), "rows=[]");
}

#[test]
fn missing_custom_template_is_error() {
    let dir = tempdir().unwrap();

    let err = load_template(Some(&dir.path().join("absent.html"))).unwrap_err();

    assert!(matches!(err, RenderError::ReadTemplate { .. }));
}

#[test]
fn write_report_creates_directories() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/reports/report-2017.06.30.html");

    // Act
    write_report(&path, "<html></html>").unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}
