use parquet::basic::Type as PhysicalType;
use parquet::data_type::ByteArray;

use crate::models::Record;
use crate::schema::COLUMN_COUNT;

/// Values of one column, tagged with their on-disk width.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    ByteString(Vec<ByteArray>),
}

impl ColumnData {
    pub fn physical_type(&self) -> PhysicalType {
        match self {
            ColumnData::Int32(_) => PhysicalType::INT32,
            ColumnData::Int64(_) => PhysicalType::INT64,
            ColumnData::ByteString(_) => PhysicalType::BYTE_ARRAY,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int32(values) => values.len(),
            ColumnData::Int64(values) => values.len(),
            ColumnData::ByteString(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write-once columnar accumulator: one typed vector per schema column.
///
/// All vectors always have the same length. A batch is filled with
/// [`append`](Self::append), handed to the writer through
/// [`into_columns`](Self::into_columns), and never reused.
#[derive(Debug, Clone, Default)]
pub struct ColumnBatch {
    timestamps: Vec<i64>,
    hosts: Vec<ByteArray>,
    remote_addrs: Vec<ByteArray>,
    identities: Vec<ByteArray>,
    users: Vec<ByteArray>,
    methods: Vec<ByteArray>,
    paths: Vec<ByteArray>,
    protos: Vec<ByteArray>,
    statuses: Vec<i32>,
    out_bytes: Vec<i64>,
    referers: Vec<ByteArray>,
    user_agents: Vec<ByteArray>,
}

impl ColumnBatch {
    /// Empty batch with every column pre-sized for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            hosts: Vec::with_capacity(capacity),
            remote_addrs: Vec::with_capacity(capacity),
            identities: Vec::with_capacity(capacity),
            users: Vec::with_capacity(capacity),
            methods: Vec::with_capacity(capacity),
            paths: Vec::with_capacity(capacity),
            protos: Vec::with_capacity(capacity),
            statuses: Vec::with_capacity(capacity),
            out_bytes: Vec::with_capacity(capacity),
            referers: Vec::with_capacity(capacity),
            user_agents: Vec::with_capacity(capacity),
        }
    }

    /// Build a batch holding `records` in input order.
    pub fn from_records(records: &[Record]) -> Self {
        let mut batch = Self::with_capacity(records.len());
        for record in records {
            batch.append(record);
        }
        batch
    }

    /// Push one value onto every column. The record is trusted as-is.
    pub fn append(&mut self, record: &Record) {
        self.timestamps.push(record.timestamp_millis());
        self.hosts.push(ByteArray::from(record.host.as_str()));
        self.remote_addrs.push(ByteArray::from(record.remote_addr.as_str()));
        self.identities.push(ByteArray::from(record.identity.as_str()));
        self.users.push(ByteArray::from(record.user.as_str()));
        self.methods.push(ByteArray::from(record.method.as_str()));
        self.paths.push(ByteArray::from(record.path.as_str()));
        self.protos.push(ByteArray::from(record.proto.as_str()));
        self.statuses.push(record.status);
        self.out_bytes.push(record.out_bytes);
        self.referers.push(ByteArray::from(record.referer.as_str()));
        self.user_agents.push(ByteArray::from(record.user_agent.as_str()));
    }

    /// Number of rows appended so far.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Consume the batch, yielding columns in
    /// [`SchemaDefinition::access_log`](crate::schema::SchemaDefinition::access_log) order.
    pub fn into_columns(self) -> [ColumnData; COLUMN_COUNT] {
        [
            ColumnData::Int64(self.timestamps),
            ColumnData::ByteString(self.hosts),
            ColumnData::ByteString(self.remote_addrs),
            ColumnData::ByteString(self.identities),
            ColumnData::ByteString(self.users),
            ColumnData::ByteString(self.methods),
            ColumnData::ByteString(self.paths),
            ColumnData::ByteString(self.protos),
            ColumnData::Int32(self.statuses),
            ColumnData::Int64(self.out_bytes),
            ColumnData::ByteString(self.referers),
            ColumnData::ByteString(self.user_agents),
        ]
    }
}
