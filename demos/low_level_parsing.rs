//! Example showing the line parser and the core writer used directly.

use log2parquet::{write_access_log, LineParser, ParseFailure};
use std::io::{self, BufRead};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let parser = LineParser::new();

    let mut records = Vec::new();
    let mut not_access_log = 0;
    let mut bad_timestamp = 0;
    let mut bad_integer = 0;

    // Parse stdin, printing each record as a JSON line
    for line in io::stdin().lock().lines() {
        let line = line?;
        match parser.parse(&line) {
            Ok(record) => {
                println!("{}", serde_json::to_string(&record)?);
                records.push(record);
            }
            Err(ParseFailure::NotAnAccessLogLine) => not_access_log += 1,
            Err(ParseFailure::BadTimestamp { .. }) => bad_timestamp += 1,
            Err(ParseFailure::BadInteger { .. }) => bad_integer += 1,
        }
    }

    eprintln!();
    eprintln!("═══════════════════════════════════════");
    eprintln!("  Parsed:            {}", records.len());
    eprintln!("  Not an access log: {}", not_access_log);
    eprintln!("  Bad timestamp:     {}", bad_timestamp);
    eprintln!("  Bad integer:       {}", bad_integer);

    write_access_log("stdin.parquet", &records)?;

    Ok(())
}
