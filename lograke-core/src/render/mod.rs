//! HTML report output.
//!
//! A report is a template with a `$table_json` placeholder that receives the
//! ranked rows as a JSON array. The file is written to a temporary file next to
//! its final location and renamed into place, so a failed run never leaves a
//! partial report behind.

use crate::analysis::ReportRow;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rust_embed::RustEmbed;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(RustEmbed)]
#[folder = "report-templates/"]
struct ReportTemplates;

const DEFAULT_TEMPLATE: &str = "report.html";
const TABLE_PLACEHOLDER: &str = "table_json";

// `$$` escapes, `$name` and `${name}` placeholders.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\})")
        .expect("placeholder pattern must compile")
});

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read report template {path}: {source}")]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("built-in report template {name} is missing")]
    MissingTemplate { name: String },

    #[error("failed to serialize report rows: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `report-YYYY.MM.DD.html` under `reports_dir`.
pub fn report_path(reports_dir: &Path, date: NaiveDate) -> PathBuf {
    reports_dir.join(format!("report-{}.html", date.format("%Y.%m.%d")))
}

/// Read the template at `path`, or the built-in one when no path is given.
pub fn load_template(path: Option<&Path>) -> Result<String, RenderError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| RenderError::ReadTemplate {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            let file = ReportTemplates::get(DEFAULT_TEMPLATE).ok_or_else(|| {
                RenderError::MissingTemplate {
                    name: DEFAULT_TEMPLATE.to_string(),
                }
            })?;
            Ok(String::from_utf8_lossy(&file.data).into_owned())
        }
    }
}

/// Substitute the rows into `template`. Unknown placeholders are left as they
/// are; `$$` becomes `$`.
pub fn render_template(template: &str, rows: &[ReportRow]) -> Result<String, RenderError> {
    let table_json = serde_json::to_string(rows)?;

    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures| {
        if caps.name("escaped").is_some() {
            return "$".to_string();
        }

        let name = caps
            .name("named")
            .or_else(|| caps.name("braced"))
            .map(|m| m.as_str());

        match name {
            Some(TABLE_PLACEHOLDER) => table_json.clone(),
            _ => caps[0].to_string(),
        }
    });

    Ok(rendered.into_owned())
}

/// Write `contents` to `path` atomically, creating parent directories.
pub fn write_report(path: &Path, contents: &str) -> Result<(), RenderError> {
    let write_err = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}
