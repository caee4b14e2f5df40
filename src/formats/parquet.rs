//! Row-group writer for access-log batches.
//!
//! One call to [`write`] persists one [`ColumnBatch`] as exactly one row group
//! of twelve required, flat columns, Snappy-compressed, with page-level
//! statistics so the column and offset indexes are emitted.

use log::{debug, warn};
use parquet::basic::Compression;
use parquet::column::writer::ColumnWriter;
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::file::writer::{SerializedColumnWriter, SerializedFileWriter};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::error::WriteFailure;
use crate::formats::batch::{ColumnBatch, ColumnData};
use crate::models::Record;
use crate::schema::{ColumnSpec, SchemaDefinition};

/// How an existing destination file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Truncate and replace.
    #[default]
    Replace,
    /// Fail with `AlreadyExists`, leaving the file untouched.
    CreateNew,
}

/// Writer-level properties shared by every column.
pub fn writer_properties() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_statistics_enabled(EnabledStatistics::Page)
        .build()
}

/// Persist `records` to `destination` as a single row group, replacing any
/// existing file.
///
/// An empty `records` slice is a no-op: the destination is neither created
/// nor modified.
///
/// # Errors
///
/// [`WriteFailure::Io`] if the destination cannot be opened (nothing has been
/// encoded at that point), [`WriteFailure::Encode`] if the container rejects
/// the schema, a column, or a close. On failure the file may exist but is not
/// usable.
pub fn write<P: AsRef<Path>>(destination: P, records: &[Record]) -> Result<(), WriteFailure> {
    write_with_mode(destination, records, OpenMode::Replace)
}

/// [`write`] with an explicit policy for an existing destination.
pub fn write_with_mode<P: AsRef<Path>>(
    destination: P,
    records: &[Record],
    mode: OpenMode,
) -> Result<(), WriteFailure> {
    let path = destination.as_ref();
    if records.is_empty() {
        debug!("No records for {}, leaving it untouched", path.display());
        return Ok(());
    }

    let file = open_destination(path, mode)?;
    let schema = SchemaDefinition::access_log();
    let batch = ColumnBatch::from_records(records);

    debug!("Writing {} rows to {}", batch.len(), path.display());
    write_batch(file, &schema, batch)
}

fn open_destination(path: &Path, mode: OpenMode) -> Result<File, WriteFailure> {
    let opened = match mode {
        OpenMode::Replace => File::create(path),
        OpenMode::CreateNew => OpenOptions::new().write(true).create_new(true).open(path),
    };
    opened.map_err(|source| WriteFailure::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `batch` into `sink` as one row group laid out by `schema`.
///
/// The row group and the file writer are closed on every path. When a column
/// write fails, the close sequence still runs and the column error is the one
/// returned.
pub fn write_batch<W: Write + Send>(
    sink: W,
    schema: &SchemaDefinition,
    batch: ColumnBatch,
) -> Result<(), WriteFailure> {
    let root = schema
        .to_parquet()
        .map_err(WriteFailure::encode("schema"))?;
    let mut writer = SerializedFileWriter::new(sink, root, Arc::new(writer_properties()))
        .map_err(WriteFailure::encode("file header"))?;

    let written = write_row_group(&mut writer, schema, batch);
    let closed = writer
        .close()
        .map(|_| ())
        .map_err(WriteFailure::encode("file footer"));

    finish(written, closed)
}

fn write_row_group<W: Write + Send>(
    writer: &mut SerializedFileWriter<W>,
    schema: &SchemaDefinition,
    batch: ColumnBatch,
) -> Result<(), WriteFailure> {
    let mut row_group = writer
        .next_row_group()
        .map_err(WriteFailure::encode("row group"))?;

    let mut written = Ok(());
    for (spec, data) in schema.columns().iter().zip(batch.into_columns()) {
        let column = match row_group.next_column() {
            Ok(Some(column)) => column,
            Ok(None) => {
                written = Err(WriteFailure::Encode {
                    context: format!("column '{}'", spec.name),
                    source: parquet::errors::ParquetError::General(
                        "writer returned fewer columns than the schema describes".to_string(),
                    ),
                });
                break;
            }
            Err(e) => {
                written = Err(WriteFailure::encode(format!("column '{}'", spec.name))(e));
                break;
            }
        };
        if let Err(e) = write_column(column, spec, data) {
            written = Err(e);
            break;
        }
    }

    if written.is_ok() {
        written = match row_group.next_column() {
            Ok(None) => Ok(()),
            Ok(Some(_)) => Err(WriteFailure::Encode {
                context: "row group".to_string(),
                source: parquet::errors::ParquetError::General(
                    "writer returned more columns than the schema describes".to_string(),
                ),
            }),
            Err(e) => Err(WriteFailure::encode("row group")(e)),
        };
    }

    let closed = row_group
        .close()
        .map(|_| ())
        .map_err(WriteFailure::encode("row group"));

    finish(written, closed)
}

fn write_column(
    mut column: SerializedColumnWriter<'_>,
    spec: &ColumnSpec,
    data: ColumnData,
) -> Result<(), WriteFailure> {
    let context = || format!("column '{}'", spec.name);

    if data.physical_type() != spec.kind.physical_type() {
        return Err(WriteFailure::Encode {
            context: context(),
            source: parquet::errors::ParquetError::General(format!(
                "batch holds {} values, schema declares {}",
                data.physical_type(),
                spec.kind.physical_type()
            )),
        });
    }

    let result = match (column.untyped(), &data) {
        (ColumnWriter::Int32ColumnWriter(w), ColumnData::Int32(values)) => {
            w.write_batch(values, None, None)
        }
        (ColumnWriter::Int64ColumnWriter(w), ColumnData::Int64(values)) => {
            w.write_batch(values, None, None)
        }
        (ColumnWriter::ByteArrayColumnWriter(w), ColumnData::ByteString(values)) => {
            w.write_batch(values, None, None)
        }
        _ => Err(parquet::errors::ParquetError::General(format!(
            "no {} column sink for this column",
            data.physical_type()
        ))),
    };
    result.map_err(WriteFailure::encode(context()))?;

    column.close().map_err(WriteFailure::encode(context()))
}

/// Combine a body result with the close that follows it; the body's error
/// wins and a later close error is only logged.
fn finish(
    body: Result<(), WriteFailure>,
    closed: Result<(), WriteFailure>,
) -> Result<(), WriteFailure> {
    match (body, closed) {
        (Err(e), Err(close_err)) => {
            warn!("Close after failed write also failed: {}", close_err);
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}
