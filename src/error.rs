//! Error types for the access-log converter.
//!
//! Two failure families make up the core contract: [`ParseFailure`] is local
//! to one input line, [`WriteFailure`] is fatal to one `write` call. The
//! crate-level [`Error`] covers the higher-level reader and writer.

use std::fmt;
use std::path::PathBuf;

use parquet::errors::ParquetError;

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single line could not be turned into a [`Record`](crate::models::Record).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    /// The line does not match the access-log grammar at all.
    #[error("not an access log line")]
    NotAnAccessLogLine,

    /// The bracketed request time is not `dd/Mon/yyyy:HH:MM:SS +zzzz`.
    #[error("bad timestamp '{value}': {reason}")]
    BadTimestamp { value: String, reason: String },

    /// The status or byte-count token is not a valid integer.
    #[error("bad integer in {field} field: '{value}'")]
    BadInteger { field: &'static str, value: String },
}

/// Why a batch could not be persisted.
///
/// After either variant the destination file, if it exists, must be treated
/// as unreliable.
#[derive(Debug, thiserror::Error)]
pub enum WriteFailure {
    /// The destination could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Parquet container or the sink beneath it failed. `context` names
    /// the step where the failure surfaced; buffered output may belong to an
    /// earlier step.
    #[error("write failed at {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: ParquetError,
    },
}

impl WriteFailure {
    pub(crate) fn encode(context: impl Into<String>) -> impl FnOnce(ParquetError) -> Self {
        let context = context.into();
        move |source| WriteFailure::Encode { context, source }
    }
}

/// Errors surfaced by the high-level reader and writer.
#[derive(Debug)]
pub enum Error {
    /// I/O error occurred while reading input
    Io(std::io::Error),

    /// Writing the Parquet output failed
    Write(WriteFailure),

    /// Invalid configuration (e.g., builder missing a destination)
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Write(err) => write!(f, "Write error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Write(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<WriteFailure> for Error {
    fn from(err: WriteFailure) -> Self {
        Error::Write(err)
    }
}
