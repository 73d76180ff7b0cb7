//! Access-log line grammar.
//!
//! Lines are produced by the nginx `ui_short` log format:
//!
//! ```text
//! $remote_addr $remote_user  $http_x_real_ip [$time_local] "$request"
//! $status $body_bytes_sent "$http_referer" "$http_user_agent"
//! "$http_x_forwarded_for" "$http_X_REQUEST_ID" "$http_X_RB_USER" $request_time
//! ```
//!
//! Only the request path and `$request_time` are extracted. The whole prefix up
//! to and including the request time must conform, otherwise the line is
//! rejected.

use crate::analysis::types::ParsedRecord;
use once_cell::sync::Lazy;
use regex::Regex;

static LOG_RECORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^",
        r"\S+ ",                          // remote_addr
        r"\S+\s+",                        // remote_user (followed by two spaces)
        r"\S+ ",                          // http_x_real_ip
        r"\[\S+ \S+\] ",                  // time_local, e.g. [29/Jun/2017:10:46:03 +0300]
        r#""\S+ (?P<href>\S+) \S+" "#,    // request, e.g. "GET /api/v2/banner/1 HTTP/1.1"
        r"[0-9]+ ",                       // status
        r"[0-9]+ ",                       // body_bytes_sent
        r#""\S+" "#,                      // http_referer
        r#"".*" "#,                       // http_user_agent
        r#""\S+" "#,                      // http_x_forwarded_for
        r#""\S+" "#,                      // http_X_REQUEST_ID
        r#""\S+" "#,                      // http_X_RB_USER
        r"(?P<time>[0-9]+\.[0-9]+)",      // request_time
    ))
    .expect("log record grammar must compile")
});

/// Parses one decoded line. Surrounding whitespace is ignored.
pub fn parse_line(line: &str) -> Option<ParsedRecord> {
    let caps = LOG_RECORD_RE.captures(line.trim())?;

    let endpoint = caps.name("href")?.as_str().to_string();
    let latency = caps.name("time")?.as_str().parse::<f64>().ok()?;

    Some(ParsedRecord { endpoint, latency })
}

/// Parses one raw line as read from disk. Bytes that are not valid UTF-8
/// count as a parse failure.
pub fn parse_bytes(raw: &[u8]) -> Option<ParsedRecord> {
    let line = std::str::from_utf8(raw).ok()?;
    parse_line(line)
}
