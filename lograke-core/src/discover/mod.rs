use chrono::NaiveDate;
use glob::{Pattern, glob};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;


static LOG_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^nginx-access-ui\.log-(?P<date>[0-9]{8})(\.gz)?$")
        .expect("log file name pattern must compile")
});

const LOG_NAME_GLOB: &str = "nginx-access-ui.log-*";

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// The newest access log found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestLog {
    pub path: PathBuf,
    pub date: NaiveDate,
}

/// Finds the access log with the most recent date in its name.
///
/// Only `nginx-access-ui.log-YYYYMMDD` and `nginx-access-ui.log-YYYYMMDD.gz`
/// are candidates; names with an invalid calendar date are skipped. When two
/// files carry the same date, the first in path order wins.
///
/// Returns `Ok(None)` when `logs_dir` does not exist or holds no candidate.
pub fn find_latest_log(logs_dir: &Path) -> Result<Option<LatestLog>, DiscoverError> {
    if !logs_dir.is_dir() {
        tracing::debug!(dir = %logs_dir.display(), "log directory does not exist");
        return Ok(None);
    }

    let mut latest: Option<LatestLog> = None;

    for path in discover(logs_dir, LOG_NAME_GLOB)? {
        let Some(date) = log_date(&path) else {
            continue;
        };

        if latest.as_ref().is_none_or(|l| date > l.date) {
            latest = Some(LatestLog { path, date });
        }
    }

    Ok(latest)
}

/// Date encoded in an access-log file name, if the name is a candidate.
pub fn log_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let caps = LOG_NAME_RE.captures(name)?;
    NaiveDate::parse_from_str(&caps["date"], "%Y%m%d").ok()
}

/// Files under `root` matching `glob_pattern`, in sorted order. Directories
/// and unreadable entries are skipped.
pub fn discover(root: &Path, glob_pattern: &str) -> Result<Vec<PathBuf>, DiscoverError> {
    let pattern = &resolve_glob(root, glob_pattern);
    let mut paths: Vec<_> = glob(pattern)
        .map_err(|e| DiscoverError::Glob {
            pattern: pattern.to_string(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

/// Joins `pattern` onto `root`, escaping any glob metacharacters in `root`.
pub fn resolve_glob(root: &Path, pattern: &str) -> String {
    let root = Pattern::escape(&root.to_string_lossy());
    Path::new(&root).join(pattern).to_string_lossy().into_owned()
}
