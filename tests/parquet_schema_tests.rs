mod common;

use common::numbered_lines;
use log2parquet::{write_access_log, LineParser, Record};
use parquet::basic::{Compression, LogicalType, Repetition, TimeUnit, Type as PhysicalType};
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use tempfile::tempdir;

fn sample_records(n: usize) -> Vec<Record> {
    let parser = LineParser::new();
    numbered_lines(n)
        .iter()
        .map(|l| parser.parse(l).unwrap())
        .collect()
}

#[test]
fn test_column_names_and_order() {
    let dir = tempdir().unwrap();
    let parquet_file = dir.path().join("access.parquet");
    write_access_log(&parquet_file, &sample_records(3)).unwrap();

    let reader = SerializedFileReader::new(File::open(&parquet_file).unwrap()).unwrap();
    let schema = reader.metadata().file_metadata().schema_descr();

    let names: Vec<_> = schema.columns().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(
        names,
        [
            "timestamp",
            "host",
            "remote_addr",
            "identity",
            "user",
            "method",
            "path",
            "proto",
            "status",
            "out_bytes",
            "referer",
            "user_agent",
        ]
    );
}

#[test]
fn test_column_types() {
    let dir = tempdir().unwrap();
    let parquet_file = dir.path().join("access.parquet");
    write_access_log(&parquet_file, &sample_records(3)).unwrap();

    let reader = SerializedFileReader::new(File::open(&parquet_file).unwrap()).unwrap();
    let schema = reader.metadata().file_metadata().schema_descr();

    for column in schema.columns() {
        let info = column.self_type().get_basic_info();
        assert_eq!(
            info.repetition(),
            Repetition::REQUIRED,
            "{} should be required",
            column.name()
        );
        assert_eq!(column.max_def_level(), 0);
        assert_eq!(column.max_rep_level(), 0);

        let expected = match column.name() {
            "timestamp" | "out_bytes" => PhysicalType::INT64,
            "status" => PhysicalType::INT32,
            _ => PhysicalType::BYTE_ARRAY,
        };
        assert_eq!(column.physical_type(), expected, "{}", column.name());
    }

    let ts = schema.column(0);
    assert_eq!(
        ts.logical_type(),
        Some(LogicalType::Timestamp {
            is_adjusted_to_u_t_c: true,
            unit: TimeUnit::MILLIS,
        })
    );
}

#[test]
fn test_snappy_and_page_index() {
    let dir = tempdir().unwrap();
    let parquet_file = dir.path().join("access.parquet");
    write_access_log(&parquet_file, &sample_records(50)).unwrap();

    let reader = SerializedFileReader::new(File::open(&parquet_file).unwrap()).unwrap();
    let row_group = reader.metadata().row_group(0);

    for column in row_group.columns() {
        assert_eq!(column.compression(), Compression::SNAPPY);
        assert!(
            column.offset_index_offset().is_some(),
            "{} has no offset index",
            column.column_path()
        );
        assert!(
            column.column_index_offset().is_some(),
            "{} has no column index",
            column.column_path()
        );
        assert!(column.statistics().is_some());
    }
}
