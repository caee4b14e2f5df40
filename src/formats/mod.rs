//! Columnar output: the in-memory column batch and the Parquet writer that
//! persists it.

pub mod batch;
pub mod parquet;
