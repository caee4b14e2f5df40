//! Simple example of converting an access log to Parquet.

use log2parquet::{AccessLogReader, ParquetWriter};

fn main() -> Result<(), log2parquet::Error> {
    // Read and parse the log, skipping lines that don't match
    let (records, read_stats) = AccessLogReader::from_file("access.log")?.read_all_with_stats()?;

    println!("{}", read_stats.summary());

    // Write to Parquet
    let stats = ParquetWriter::new("access.log.parquet").write_with_stats(&records)?;

    println!("{}", stats.summary());

    Ok(())
}
