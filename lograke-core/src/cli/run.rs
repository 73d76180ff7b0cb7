use crate::conf::load_config;
use crate::logging::init_logging;
use crate::pipeline::{RunOutcome, run as run_pipeline};
use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;

/// Load the config, set up logging and perform one report run.
///
/// Config errors are reported on stderr since logging is not set up yet.
/// Everything after that is reported through the log.
pub fn run(config_path: &Path) -> Result<ExitCode> {
    let config = load_config(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;

    let _guard = init_logging(config.log_file.as_deref())?;

    match run_pipeline(&config) {
        Ok(outcome) => {
            match &outcome {
                RunOutcome::NoLogFile { .. } => {
                    tracing::info!(outcome = "no_log_file", "nothing to do")
                }
                RunOutcome::UpToDate { .. } => {
                    tracing::info!(outcome = "up_to_date", "nothing to do")
                }
                RunOutcome::Reported { rows, totals, .. } => tracing::info!(
                    outcome = "reported",
                    rows,
                    lines = totals.total_records,
                    unparsed = totals.total_errors,
                    "done"
                ),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_error_limit_exceeded() => {
            let err = anyhow::Error::from(err);
            tracing::error!(outcome = "aborted", error = %format!("{err:#}"), "run aborted");
            Ok(ExitCode::from(2))
        }
        Err(err) => {
            let err = anyhow::Error::from(err);
            tracing::error!(outcome = "failed", error = %format!("{err:#}"), "unexpected error");
            Ok(ExitCode::FAILURE)
        }
    }
}
