//! High-level API for writing parsed access-log records to Parquet.

use crate::error::{Error, Result};
use crate::formats::parquet::{self, OpenMode};
use crate::models::Record;
use std::fs;
use std::path::{Path, PathBuf};

/// Writer for persisting access-log records as one Parquet file.
///
/// Each call writes all records into a single row group. An existing file at
/// the destination is replaced unless [`overwrite(false)`](Self::overwrite)
/// was requested.
///
/// # Examples
///
/// ```no_run
/// use log2parquet::{AccessLogReader, ParquetWriter};
///
/// let records = AccessLogReader::from_file("access.log")?.read_all()?;
///
/// ParquetWriter::new("access.log.parquet")
///     .write(&records)?;
/// # Ok::<(), log2parquet::Error>(())
/// ```
pub struct ParquetWriter {
    destination: PathBuf,
    overwrite: bool,
}

impl ParquetWriter {
    /// Create a new Parquet writer targeting `destination`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use log2parquet::ParquetWriter;
    ///
    /// let writer = ParquetWriter::new("./access.parquet");
    /// ```
    pub fn new<P: AsRef<Path>>(destination: P) -> Self {
        Self {
            destination: destination.as_ref().to_path_buf(),
            overwrite: true,
        }
    }

    /// Whether an existing destination may be replaced. Default is `true`.
    ///
    /// With `false`, writing to an existing file fails and leaves it untouched.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn open_mode(&self) -> OpenMode {
        if self.overwrite {
            OpenMode::Replace
        } else {
            OpenMode::CreateNew
        }
    }

    /// Write the records to the destination.
    ///
    /// Writing an empty slice does nothing, the destination is not created or
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the destination cannot be opened or the
    /// Parquet encoding fails.
    pub fn write(&self, records: &[Record]) -> Result<()> {
        parquet::write_with_mode(&self.destination, records, self.open_mode())?;
        Ok(())
    }

    /// Write records and return statistics about the write operation.
    pub fn write_with_stats(&self, records: &[Record]) -> Result<WriteStats> {
        self.write(records)?;

        let (num_row_groups, bytes_written) = if records.is_empty() {
            (0, 0)
        } else {
            (1, fs::metadata(&self.destination)?.len())
        };

        Ok(WriteStats {
            num_records: records.len(),
            num_row_groups,
            bytes_written,
            destination: self.destination.clone(),
        })
    }
}

/// Statistics about a Parquet write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStats {
    /// Total number of records written
    pub num_records: usize,
    /// Row groups written (0 for empty input, otherwise 1)
    pub num_row_groups: usize,
    /// Size of the finished file
    pub bytes_written: u64,
    pub destination: PathBuf,
}

impl WriteStats {
    /// Get a human-readable summary of the write operation.
    pub fn summary(&self) -> String {
        if self.num_row_groups == 0 {
            return format!("Nothing written to {}", self.destination.display());
        }
        format!(
            "Wrote {} records in {} row group ({} bytes) to {}",
            self.num_records,
            self.num_row_groups,
            self.bytes_written,
            self.destination.display()
        )
    }
}

/// Builder for configuring Parquet write options.
///
/// # Examples
///
/// ```no_run
/// use log2parquet::{AccessLogReader, ParquetWriterBuilder};
///
/// let records = AccessLogReader::from_file("access.log")?.read_all()?;
///
/// ParquetWriterBuilder::new()
///     .destination("./access.parquet")
///     .overwrite(false)
///     .build()?
///     .write(&records)?;
/// # Ok::<(), log2parquet::Error>(())
/// ```
pub struct ParquetWriterBuilder {
    destination: Option<PathBuf>,
    overwrite: bool,
}

impl ParquetWriterBuilder {
    /// Create a new Parquet writer builder with default options.
    pub fn new() -> Self {
        Self {
            destination: None,
            overwrite: true,
        }
    }

    /// Set the destination file.
    pub fn destination<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.destination = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether an existing destination may be replaced.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Build the Parquet writer.
    ///
    /// # Errors
    ///
    /// Returns an error if destination was not set.
    pub fn build(self) -> Result<ParquetWriter> {
        let destination = self
            .destination
            .ok_or_else(|| Error::Config("Destination not set".to_string()))?;

        Ok(ParquetWriter {
            destination,
            overwrite: self.overwrite,
        })
    }
}

impl Default for ParquetWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
