use flate2::Compression;
use flate2::write::GzEncoder;
use lograke_core::conf::AnalyzerConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A well-formed `ui_short` access-log line.
pub fn log_line(path: &str, time: &str) -> String {
    format!(
        "1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] \"GET {path} HTTP/1.1\" 200 927 \"-\" \
         \"Lynx/2.8.8dev.9 libwww-FM/2.14 SSL-MM/1.4.1 GNUTLS/2.10.5\" \"-\" \
         \"1498697422-2190034393-4708-9752759\" \"dc7161be3\" {time}"
    )
}

/// Scratch `log/` and `reports/` directories for one test run.
pub struct LogDir {
    root: TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(root.path().join("log")).expect("failed to create log dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root().join("log")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root().join("reports")
    }

    pub fn config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            logs_dir: self.logs_dir(),
            reports_dir: self.reports_dir(),
            ..AnalyzerConfig::default()
        }
    }

    /// Write `nginx-access-ui.log-{date}` with one line per entry.
    pub fn write_plain(&self, date: &str, lines: &[String]) -> PathBuf {
        let path = self.logs_dir().join(format!("nginx-access-ui.log-{date}"));
        fs::write(&path, join_lines(lines)).expect("failed to write log");
        path
    }

    /// Write `nginx-access-ui.log-{date}.gz` with one line per entry.
    pub fn write_gz(&self, date: &str, lines: &[String]) -> PathBuf {
        let path = self.logs_dir().join(format!("nginx-access-ui.log-{date}.gz"));
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(join_lines(lines).as_bytes())
            .expect("failed to compress log");
        fs::write(&path, encoder.finish().expect("failed to finish gzip"))
            .expect("failed to write log");
        path
    }

    pub fn reports(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.reports_dir()) else {
            return Vec::new();
        };
        let mut out: Vec<_> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
        out.sort();
        out
    }
}

impl Default for LogDir {
    fn default() -> Self {
        Self::new()
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
