//! On-disk column layout.
//!
//! [`SchemaDefinition::access_log`] is the single declaration of column
//! names, types and order. The column batch, the Parquet message type and the
//! row-group writer all walk the same array, so the order cannot drift
//! between them.

use std::sync::Arc;

use parquet::basic::{LogicalType, Repetition, TimeUnit, Type as PhysicalType};
use parquet::errors::Result as ParquetResult;
use parquet::schema::types::{Type, TypePtr};

/// Number of columns in the access-log schema.
pub const COLUMN_COUNT: usize = 12;

/// Logical type of a column, independent of how it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Milliseconds since the epoch, UTC-normalized, stored as INT64.
    TimestampMillis,
    /// Variable-length bytes.
    ByteString,
    Int32,
    Int64,
}

impl ColumnKind {
    pub fn physical_type(self) -> PhysicalType {
        match self {
            ColumnKind::TimestampMillis | ColumnKind::Int64 => PhysicalType::INT64,
            ColumnKind::ByteString => PhysicalType::BYTE_ARRAY,
            ColumnKind::Int32 => PhysicalType::INT32,
        }
    }

    pub fn logical_type(self) -> Option<LogicalType> {
        match self {
            ColumnKind::TimestampMillis => Some(LogicalType::Timestamp {
                is_adjusted_to_u_t_c: true,
                unit: TimeUnit::MILLIS,
            }),
            _ => None,
        }
    }
}

/// One column: name, logical type and whether a value is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

impl ColumnSpec {
    const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    fn repetition(&self) -> Repetition {
        if self.required {
            Repetition::REQUIRED
        } else {
            Repetition::OPTIONAL
        }
    }

    fn to_parquet(self) -> ParquetResult<TypePtr> {
        let field = Type::primitive_type_builder(self.name, self.kind.physical_type())
            .with_repetition(self.repetition())
            .with_logical_type(self.kind.logical_type())
            .build()?;
        Ok(Arc::new(field))
    }
}

/// Ordered, immutable list of every column written per row group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    columns: [ColumnSpec; COLUMN_COUNT],
}

const ACCESS_LOG_COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec::required("timestamp", ColumnKind::TimestampMillis),
    ColumnSpec::required("host", ColumnKind::ByteString),
    ColumnSpec::required("remote_addr", ColumnKind::ByteString),
    ColumnSpec::required("identity", ColumnKind::ByteString),
    ColumnSpec::required("user", ColumnKind::ByteString),
    ColumnSpec::required("method", ColumnKind::ByteString),
    ColumnSpec::required("path", ColumnKind::ByteString),
    ColumnSpec::required("proto", ColumnKind::ByteString),
    ColumnSpec::required("status", ColumnKind::Int32),
    ColumnSpec::required("out_bytes", ColumnKind::Int64),
    ColumnSpec::required("referer", ColumnKind::ByteString),
    ColumnSpec::required("user_agent", ColumnKind::ByteString),
];

impl SchemaDefinition {
    /// The twelve-column access-log layout.
    pub const fn access_log() -> Self {
        Self {
            columns: ACCESS_LOG_COLUMNS,
        }
    }

    pub fn columns(&self) -> &[ColumnSpec; COLUMN_COUNT] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Build the Parquet message type (root group named `schema`).
    pub fn to_parquet(&self) -> ParquetResult<TypePtr> {
        let fields = self
            .columns
            .iter()
            .map(|column| column.to_parquet())
            .collect::<ParquetResult<Vec<_>>>()?;

        let schema = Type::group_type_builder("schema")
            .with_fields(fields)
            .build()?;
        Ok(Arc::new(schema))
    }
}

impl Default for SchemaDefinition {
    fn default() -> Self {
        Self::access_log()
    }
}
