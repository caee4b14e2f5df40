//! High-level API for reading access-log files.

use crate::error::Result;
use crate::models::Record;
use crate::parser::LineParser;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// Reads newline-delimited access-log text and parses every line.
///
/// Lines that fail to parse are logged at `warn` level and skipped; they never
/// abort the read. Blank lines are ignored.
///
/// # Examples
///
/// ```no_run
/// use log2parquet::AccessLogReader;
///
/// let reader = AccessLogReader::from_file("access.log")?;
/// let records = reader.read_all()?;
/// println!("Parsed {} records", records.len());
/// # Ok::<(), log2parquet::Error>(())
/// ```
pub struct AccessLogReader<R> {
    input: R,
    parser: Arc<LineParser>,
}

impl AccessLogReader<BufReader<File>> {
    /// Open a log file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> AccessLogReader<R> {
    /// Read lines from any buffered source, e.g. an already decompressed stream.
    pub fn from_reader(input: R) -> Self {
        Self {
            input,
            parser: Arc::new(LineParser::new()),
        }
    }

    /// Use a parser shared with other readers instead of compiling a new one.
    pub fn with_parser(mut self, parser: Arc<LineParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Read every line, returning the parsed records in input order.
    ///
    /// # Errors
    ///
    /// Only I/O errors on the underlying source are returned. Invalid UTF-8 is
    /// decoded lossily and then handled like any other line.
    pub fn read_all(self) -> Result<Vec<Record>> {
        let (records, _) = self.read_all_with_stats()?;
        Ok(records)
    }

    /// Like [`read_all`](Self::read_all), also reporting how many lines were
    /// parsed and skipped.
    pub fn read_all_with_stats(mut self) -> Result<(Vec<Record>, ReadStats)> {
        let mut records = Vec::new();
        let mut stats = ReadStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.lines += 1;

            let line = String::from_utf8_lossy(trim_newline(&buf));
            if line.trim().is_empty() {
                stats.blank += 1;
                continue;
            }

            match self.parser.parse(&line) {
                Ok(record) => {
                    stats.parsed += 1;
                    records.push(record);
                }
                Err(err) => {
                    stats.skipped += 1;
                    warn!("line {}: {}: {}", stats.lines, err, line);
                }
            }
        }

        Ok((records, stats))
    }
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Line accounting for one read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Lines seen, including blank and skipped ones
    pub lines: usize,
    /// Lines turned into records
    pub parsed: usize,
    /// Lines rejected by the parser
    pub skipped: usize,
    /// Empty or whitespace-only lines
    pub blank: usize,
}

impl ReadStats {
    /// Get a human-readable summary of the read.
    pub fn summary(&self) -> String {
        format!(
            "Parsed {} of {} lines ({} skipped, {} blank)",
            self.parsed, self.lines, self.skipped, self.blank
        )
    }
}
