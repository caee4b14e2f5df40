//! Command-line interface for the access-log converter.
//!
//! This binary converts one or more access-log files to Parquet, one output
//! file per input.

use anyhow::Result;
use clap::Parser;
use log::{error, info, LevelFilter};
use log2parquet::{AccessLogReader, LineParser, ParquetWriter};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert web-server access logs to Parquet format",
    long_about = "Parses access-log lines into typed records and writes them as a single \
                  Snappy-compressed Parquet row group per input file.\n\n\
                  Lines that do not parse are logged and skipped."
)]
struct Args {
    /// Access log files to convert
    #[arg(value_name = "LOG", required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the Parquet files (default: next to each input)
    #[arg(short, long, value_name = "OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Fail instead of replacing an existing Parquet file
    #[arg(long)]
    no_overwrite: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// `<input file name>.parquet`, in `out_dir` or beside the input.
fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let mut name: OsString = input.file_name().map(OsString::from).unwrap_or_default();
    name.push(".parquet");
    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

fn convert_one_file(
    input: &Path,
    output: &Path,
    parser: &Arc<LineParser>,
    overwrite: bool,
) -> Result<()> {
    info!("📄 Processing: {}", input.display());
    let start_time = Instant::now();

    let (records, read_stats) = AccessLogReader::from_file(input)?
        .with_parser(Arc::clone(parser))
        .read_all_with_stats()?;
    info!("   ├─ {} in {:.2?}", read_stats.summary(), start_time.elapsed());

    if records.is_empty() {
        info!("   └─ No records parsed, skipping output\n");
        return Ok(());
    }

    let t1 = Instant::now();
    let write_stats = ParquetWriter::new(output)
        .overwrite(overwrite)
        .write_with_stats(&records)?;

    info!("   ├─ Wrote Parquet in {:.2?}", t1.elapsed());
    info!("   ├─ {}", write_stats.summary());
    info!("   └─ ✓ Total time: {:.2?}\n", start_time.elapsed());

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format_timestamp(None)
        .init();

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)?;
    }

    let parser = Arc::new(LineParser::new());
    let total_start = Instant::now();
    let mut failed = 0usize;

    for (idx, input) in args.inputs.iter().enumerate() {
        info!("[{}/{}]", idx + 1, args.inputs.len());

        let output = output_path(input, args.out_dir.as_deref());
        if let Err(e) = convert_one_file(input, &output, &parser, !args.no_overwrite) {
            error!("   └─ ✗ Error: {}", e);
            error!("");
            failed += 1;
        }
    }

    info!("═══════════════════════════════════════════");
    info!("🏁 All files processed in {:.2?}", total_start.elapsed());

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed", failed, args.inputs.len());
    }
    Ok(())
}
