use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One successfully parsed access-log line.
///
/// Every field is always present: textual placeholders such as `-` are kept
/// verbatim, except for the byte count where `-` becomes `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub host: String,
    pub remote_addr: String,
    pub identity: String,
    pub user: String,
    /// Request time with the offset it was logged in.
    pub time: DateTime<FixedOffset>,
    pub method: String,
    pub path: String,
    pub proto: String,
    pub status: i32,
    /// Response size in bytes; never negative.
    pub out_bytes: i64,
    pub referer: String,
    pub user_agent: String,
}

impl Record {
    /// Request time as milliseconds since the Unix epoch, normalized to UTC.
    pub fn timestamp_millis(&self) -> i64 {
        self.time.timestamp_millis()
    }
}
