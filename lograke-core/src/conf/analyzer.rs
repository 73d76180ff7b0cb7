use crate::conf::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one analysis run.
///
/// Keys use the upper-case names of the JSON config files this tool reads,
/// e.g. `{"MAX_REPORT_SIZE": 500, "ERRORS_LIMIT": 0.1}`. Missing keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct AnalyzerConfig {
    /// Highest tolerated share of unparsed lines. `null` disables the check.
    pub errors_limit: Option<f64>,

    /// Maximum number of endpoints in a report.
    pub max_report_size: usize,

    pub reports_dir: PathBuf,

    pub logs_dir: PathBuf,

    /// Where to write the tool's own log. Stdout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// HTML template with a `$table_json` placeholder. Built-in when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_template: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            errors_limit: Some(1.0),
            max_report_size: 1000,
            reports_dir: PathBuf::from("./reports"),
            logs_dir: PathBuf::from("./log"),
            log_file: None,
            report_template: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_report_size == 0 {
            return Err(ConfigError::InvalidMaxReportSize);
        }

        if let Some(limit) = self.errors_limit
            && !(limit.is_finite() && limit >= 0.0)
        {
            return Err(ConfigError::InvalidErrorsLimit { value: limit });
        }

        Ok(())
    }
}
