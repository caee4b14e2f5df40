//! # log2parquet
//!
//! Converts web-server access logs into typed, columnar Apache Parquet files.
//!
//! ## Features
//!
//! - **Structural parsing**: paths with spaces, free-form user agents and
//!   referers, timezone-aware timestamps
//! - **Typed columns**: millisecond UTC timestamps, 32-bit status, 64-bit byte
//!   counts, byte strings for everything else
//! - **One row group per write**: Snappy compression and page indexes enabled
//! - **Tolerant input**: malformed lines are reported and skipped, never fatal
//!
//! ## Quick Start
//!
//! ```no_run
//! use log2parquet::{AccessLogReader, ParquetWriter};
//!
//! let records = AccessLogReader::from_file("access.log")?.read_all()?;
//!
//! println!("Read {} records", records.len());
//!
//! ParquetWriter::new("access.log.parquet").write(&records)?;
//! # Ok::<(), log2parquet::Error>(())
//! ```
//!
//! ## Log Format
//!
//! ```text
//! HOST REMOTE IDENTITY USER [TIME] "METHOD PATH PROTO" STATUS BYTES "REFERER" "USERAGENT"
//! ```
//!
//! For example:
//!
//! ```text
//! www.example.com 10.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET /index.html HTTP/1.1" 200 1024 "-" "curl/8.0"
//! ```
//!
//! ## Low-Level Access
//!
//! The two core operations can be used directly:
//!
//! ```no_run
//! use log2parquet::{write_access_log, LineParser, ParseFailure};
//!
//! let parser = LineParser::new();
//! let mut records = Vec::new();
//! for line in std::fs::read_to_string("access.log")?.lines() {
//!     match parser.parse(line) {
//!         Ok(record) => records.push(record),
//!         Err(ParseFailure::NotAnAccessLogLine) => continue,
//!         Err(err) => eprintln!("skipping line: {}", err),
//!     }
//! }
//! write_access_log("access.parquet", &records)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{Error, ParseFailure, Result, WriteFailure};
pub use reader::{AccessLogReader, ReadStats};
pub use writer::{ParquetWriter, ParquetWriterBuilder, WriteStats};

pub use formats::parquet::write as write_access_log;
pub use models::Record;
pub use parser::LineParser;
pub use schema::SchemaDefinition;

pub mod formats;
pub mod models;
pub mod parser;
pub mod schema;
