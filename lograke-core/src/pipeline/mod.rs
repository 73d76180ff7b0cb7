//! One end-to-end report run.
//!
//! Idle → Reading → (Aborted | Aggregated) → Reported
//!
//! A run resolves the newest access log, skips work when its report already
//! exists, analyzes the log and writes the report. Aborted runs never leave a
//! report file behind.

use crate::analysis::{AnalysisError, RunTotals, analyze_log};
use crate::conf::AnalyzerConfig;
use crate::discover::{DiscoverError, find_latest_log};
use crate::render::{RenderError, load_template, render_template, report_path, write_report};
use std::path::PathBuf;
use thiserror::Error;


/// Terminal states of a run that are not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No access log in the logs directory.
    NoLogFile { logs_dir: PathBuf },

    /// The report for the newest log was already written by an earlier run.
    UpToDate { report: PathBuf },

    Reported {
        log: PathBuf,
        report: PathBuf,
        totals: RunTotals,
        rows: usize,
    },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to locate log files")]
    Discover(#[from] DiscoverError),

    #[error("failed to analyze log")]
    Analysis(#[from] AnalysisError),

    #[error("failed to render report")]
    Render(#[from] RenderError),
}

impl RunError {
    /// True when the run was aborted because too many lines failed to parse.
    pub fn is_error_limit_exceeded(&self) -> bool {
        matches!(
            self,
            RunError::Analysis(AnalysisError::ErrorLimitExceeded { .. })
        )
    }
}

pub fn run(config: &AnalyzerConfig) -> Result<RunOutcome, RunError> {
    let Some(latest) = find_latest_log(&config.logs_dir)? else {
        tracing::info!(logs_dir = %config.logs_dir.display(), "no log files yet");
        return Ok(RunOutcome::NoLogFile {
            logs_dir: config.logs_dir.clone(),
        });
    };

    let report = report_path(&config.reports_dir, latest.date);
    if report.is_file() {
        tracing::info!(report = %report.display(), "report is up to date");
        return Ok(RunOutcome::UpToDate { report });
    }

    let template = load_template(config.report_template.as_deref())?;

    tracing::info!(log = %latest.path.display(), "collecting data");
    let analysis = analyze_log(&latest.path, config.errors_limit, config.max_report_size)?;

    let html = render_template(&template, &analysis.rows)?;
    write_report(&report, &html)?;

    tracing::info!(
        report = %report.display(),
        rows = analysis.rows.len(),
        "report saved"
    );

    Ok(RunOutcome::Reported {
        log: latest.path,
        report,
        totals: analysis.totals,
        rows: analysis.rows.len(),
    })
}
