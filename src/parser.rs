//! Access-log line grammar.
//!
//! ```text
//! HOST REMOTE IDENTITY USER [TIME] "METHOD PATH PROTO" STATUS BYTES "REFERER" "USERAGENT"
//! ```
//!
//! Extraction is structural: `USER` runs up to the `[` that opens the
//! timestamp, the request group splits into first token / everything in
//! between / last token so the path may contain spaces, and the two trailing
//! quoted groups run up to their closing quote, skipping backslash-escaped
//! quotes. Anything after the user agent (e.g. a response time) is ignored.

use chrono::{DateTime, FixedOffset};
use regex::{Captures, Regex};

use crate::error::ParseFailure;
use crate::models::Record;

const ACCESS_LOG_PATTERN: &str = concat!(
    r"^(?P<host>\S+)\s(?P<remote>\S+)\s(?P<identity>\S+)\s(?P<user>[^\[]*?)\s",
    r"\[(?P<time>[^\]]*)\]\s",
    r#""(?P<method>[^\s"]+) (?P<path>(?:[^"\\]|\\.)*) (?P<proto>[^\s"]+)"\s"#,
    r"(?P<status>\S+)\s(?P<bytes>\S+)\s",
    r#""(?P<referer>(?:[^"\\]|\\.)*)"\s"(?P<user_agent>(?:[^"\\]|\\.)*)"(?:\s.*)?$"#,
);

/// Exact shape of the bracketed time, checked before any calendar parsing.
const TIMESTAMP_SHAPE: &str = r"^[0-9]{2}/[A-Za-z]{3}/[0-9]{4}:[0-9]{2}:[0-9]{2}:[0-9]{2} [+-][0-9]{4}$";

/// `10/Oct/2023:13:55:36 -0700`
pub const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Byte-count placeholder for "nothing sent".
const NO_BYTES: &str = "-";

/// Parses single access-log lines into [`Record`]s.
///
/// The compiled grammar lives inside the value; build one and share it
/// (`&LineParser` or `Arc<LineParser>`) between every component that parses.
/// Parsing never logs and never retries, the caller decides what to do with a
/// [`ParseFailure`].
#[derive(Debug, Clone)]
pub struct LineParser {
    pattern: Regex,
    timestamp_shape: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(ACCESS_LOG_PATTERN).expect("access log pattern must compile"),
            timestamp_shape: Regex::new(TIMESTAMP_SHAPE).expect("timestamp shape must compile"),
        }
    }

    /// Turn one line (without its trailing newline) into a record.
    ///
    /// # Errors
    ///
    /// - [`ParseFailure::NotAnAccessLogLine`] if the grammar does not match
    /// - [`ParseFailure::BadTimestamp`] if the bracketed time is malformed
    /// - [`ParseFailure::BadInteger`] if the status or byte count is not a
    ///   non-negative base-10 integer (`-` is accepted as zero bytes)
    pub fn parse(&self, line: &str) -> Result<Record, ParseFailure> {
        let caps = self
            .pattern
            .captures(line)
            .ok_or(ParseFailure::NotAnAccessLogLine)?;

        let time = self.parse_time(group(&caps, "time"))?;

        let status = parse_status(group(&caps, "status"))?;
        let out_bytes = parse_out_bytes(group(&caps, "bytes"))?;

        Ok(Record {
            host: group(&caps, "host").to_string(),
            remote_addr: group(&caps, "remote").to_string(),
            identity: group(&caps, "identity").to_string(),
            user: group(&caps, "user").to_string(),
            time,
            method: group(&caps, "method").to_string(),
            path: group(&caps, "path").to_string(),
            proto: group(&caps, "proto").to_string(),
            status,
            out_bytes,
            referer: group(&caps, "referer").to_string(),
            user_agent: group(&caps, "user_agent").to_string(),
        })
    }

    fn parse_time(&self, value: &str) -> Result<DateTime<FixedOffset>, ParseFailure> {
        let bad = |reason: String| ParseFailure::BadTimestamp {
            value: value.to_string(),
            reason,
        };
        if !self.timestamp_shape.is_match(value) {
            return Err(bad("expected dd/Mon/yyyy:HH:MM:SS +zzzz".to_string()));
        }
        DateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| bad(e.to_string()))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn parse_status(token: &str) -> Result<i32, ParseFailure> {
    token.parse::<i32>().map_err(|_| ParseFailure::BadInteger {
        field: "status",
        value: token.to_string(),
    })
}

fn parse_out_bytes(token: &str) -> Result<i64, ParseFailure> {
    if token == NO_BYTES {
        return Ok(0);
    }
    match token.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(ParseFailure::BadInteger {
            field: "bytes",
            value: token.to_string(),
        }),
    }
}
