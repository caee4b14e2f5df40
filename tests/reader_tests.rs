mod common;

use common::{numbered_lines, write_log, LogLineBuilder};
use log2parquet::{AccessLogReader, LineParser, ReadStats};
use std::io::Cursor;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_read_file_in_order() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("access.log");
    write_log(&log_path, &numbered_lines(25));

    let records = AccessLogReader::from_file(&log_path)
        .unwrap()
        .read_all()
        .unwrap();

    assert_eq!(records.len(), 25);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.path, format!("/page/{}", i));
        assert_eq!(record.out_bytes, (i * 10) as i64);
    }
}

#[test]
fn test_malformed_lines_are_skipped() {
    let lines = vec![
        LogLineBuilder::new().path("/first").build(),
        "garbage".to_string(),
        LogLineBuilder::new().time("not a time").build(),
        LogLineBuilder::new().bytes("lots").build(),
        LogLineBuilder::new().path("/second").build(),
    ];
    let input = lines.join("\n");

    let (records, stats) = AccessLogReader::from_reader(Cursor::new(input))
        .read_all_with_stats()
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].path, "/first");
    assert_eq!(records[1].path, "/second");
    assert_eq!(
        stats,
        ReadStats {
            lines: 5,
            parsed: 2,
            skipped: 3,
            blank: 0,
        }
    );
}

#[test]
fn test_blank_lines_and_crlf() {
    let input = format!(
        "{}\r\n\r\n   \n{}\r\n",
        LogLineBuilder::new().user_agent("ua one").build(),
        LogLineBuilder::new().user_agent("ua two").build()
    );

    let (records, stats) = AccessLogReader::from_reader(Cursor::new(input))
        .read_all_with_stats()
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].user_agent, "ua one");
    assert_eq!(records[1].user_agent, "ua two");
    assert_eq!(stats.blank, 2);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.lines, 4);
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let mut input = LogLineBuilder::new().user_agent("bad-").build().into_bytes();
    // Splice an invalid byte into the user agent, before its closing quote.
    let quote = input.len() - 1;
    input.insert(quote, 0xff);
    input.push(b'\n');

    let records = AccessLogReader::from_reader(Cursor::new(input))
        .read_all()
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_agent, "bad-\u{fffd}");
}

#[test]
fn test_empty_input() {
    let (records, stats) = AccessLogReader::from_reader(Cursor::new(Vec::new()))
        .read_all_with_stats()
        .unwrap();
    assert!(records.is_empty());
    assert_eq!(stats, ReadStats::default());
}

#[test]
fn test_shared_parser() {
    let parser = Arc::new(LineParser::new());
    let dir = tempdir().unwrap();

    let mut total = 0;
    for name in ["a.log", "b.log"] {
        let path = dir.path().join(name);
        write_log(&path, &numbered_lines(3));
        total += AccessLogReader::from_file(&path)
            .unwrap()
            .with_parser(Arc::clone(&parser))
            .read_all()
            .unwrap()
            .len();
    }

    assert_eq!(total, 6);
    assert_eq!(Arc::strong_count(&parser), 1);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = AccessLogReader::from_file(dir.path().join("nope.log"));
    assert!(matches!(result, Err(log2parquet::Error::Io(_))));
}

#[test]
fn test_stats_summary() {
    let stats = ReadStats {
        lines: 10,
        parsed: 7,
        skipped: 2,
        blank: 1,
    };
    assert_eq!(stats.summary(), "Parsed 7 of 10 lines (2 skipped, 1 blank)");
}
