use crate::analysis::error::AnalysisError;
use crate::analysis::parse::parse_bytes;
use crate::analysis::types::{ParsedRecord, RunTotals};
use flate2::read::MultiGzDecoder;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// How a log file is stored on disk. Decided from the file name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Plain,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(OsStr::to_str) {
            Some("gz") => Compression::Gzip,
            _ => Compression::Plain,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compression::Gzip => "gzip",
            Compression::Plain => "plain",
        }
    }
}

/// Open `path` as a line-buffered byte stream, decompressing when the name says so.
pub fn open_log(path: &Path) -> Result<Box<dyn BufRead>, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::open(path, e))?;

    let stream: Box<dyn BufRead> = match Compression::from_path(path) {
        Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        Compression::Plain => Box::new(BufReader::new(file)),
    };

    Ok(stream)
}

/// Streams parsed records out of a log, counting every line it reads and
/// every line it could not parse.
///
/// Unparsed lines are skipped silently. An I/O error is yielded once and ends
/// the stream.
pub struct LogReader<R> {
    path: PathBuf,
    reader: R,
    line: Vec<u8>,
    totals: RunTotals,
    done: bool,
}

impl LogReader<Box<dyn BufRead>> {
    pub fn open(path: &Path) -> Result<Self, AnalysisError> {
        tracing::debug!(
            path = %path.display(),
            compression = Compression::from_path(path).as_str(),
            "opening log"
        );
        Ok(Self::new(path, open_log(path)?))
    }
}

impl<R: BufRead> LogReader<R> {
    pub fn new(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            line: Vec::new(),
            totals: RunTotals::default(),
            done: false,
        }
    }

    pub fn totals(&self) -> RunTotals {
        self.totals
    }

    /// Consume the reader, releasing the underlying stream, and apply the
    /// error-rate limit to what was read.
    pub fn finish(self, errors_limit: Option<f64>) -> Result<RunTotals, AnalysisError> {
        check_error_limit(self.totals, errors_limit)?;
        Ok(self.totals)
    }
}

impl<R: BufRead> Iterator for LogReader<R> {
    type Item = Result<ParsedRecord, AnalysisError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.line.clear();

            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.totals.total_records += 1;

                    match parse_bytes(&self.line) {
                        Some(record) => return Some(Ok(record)),
                        None => self.totals.total_errors += 1,
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(AnalysisError::read(&self.path, e)));
                }
            }
        }
    }
}

/// Fails when the share of unparsed lines is strictly greater than `limit`.
/// No limit, or nothing read, always passes.
pub fn check_error_limit(totals: RunTotals, limit: Option<f64>) -> Result<(), AnalysisError> {
    let (Some(limit), Some(rate)) = (limit, totals.error_rate()) else {
        return Ok(());
    };

    if rate > limit {
        return Err(AnalysisError::ErrorLimitExceeded {
            errors: totals.total_errors,
            total: totals.total_records,
            limit,
        });
    }

    Ok(())
}
