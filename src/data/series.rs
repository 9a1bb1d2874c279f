//! Latency records and the series parser.
//!
//! A latency log is a header-less, two-column CSV file:
//!
//! ```text
//! 2024-01-01T10:00:00.120+02:00,35
//! 2024-01-01T10:00:02.118+02:00,41
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use csv::{Position, StringRecord};

use crate::error::{PipelineError, Result};

/// Naive timestamp layouts, interpreted as UTC.
static NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// A single (timestamp, latency) measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Absolute time of the measurement, with the offset it was logged in.
    pub timestamp: DateTime<FixedOffset>,
    /// Measured latency. Milliseconds by convention of the log producer.
    pub latency: f64,
}

/// Records of one file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    source: PathBuf,
    records: Vec<Record>,
}

impl Series {
    /// Create a series from already-parsed records.
    pub fn new<P: AsRef<Path>>(source: P, records: Vec<Record>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            records,
        }
    }

    /// Returns the file this series was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read a latency log from disk and parse it.
///
/// The file is read fully and closed before parsing starts.
pub fn read_series(path: &Path) -> Result<Series> {
    let content = fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_series(&content, path)
}

/// Parse latency log content.
///
/// Blank lines are skipped. Any other line must hold exactly a timestamp and a
/// finite number; the first one that does not aborts the parse.
pub fn parse_series(content: &str, source: &Path) -> Result<Series> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|err| PipelineError::MalformedRecord {
            path: source.to_path_buf(),
            line: err.position().map(|p| p.line()).unwrap_or(0),
            content: err.position().map(|p| raw_line(content, p)).unwrap_or_default(),
            reason: err.to_string(),
        })?;

        if row.len() == 1 && row[0].is_empty() {
            continue;
        }

        let record = parse_row(&row).map_err(|reason| PipelineError::MalformedRecord {
            path: source.to_path_buf(),
            line: row.position().map(|p| p.line()).unwrap_or(0),
            content: row.position().map(|p| raw_line(content, p)).unwrap_or_default(),
            reason,
        })?;
        records.push(record);
    }

    Ok(Series::new(source, records))
}

/// The text of the line a record starts on, as it appears in the file.
fn raw_line(content: &str, position: &Position) -> String {
    let start = usize::try_from(position.byte()).unwrap_or(usize::MAX);
    content
        .get(start..)
        .and_then(|rest| rest.lines().next())
        .unwrap_or_default()
        .to_string()
}

fn parse_row(row: &StringRecord) -> std::result::Result<Record, String> {
    if row.len() != 2 {
        return Err(format!("expected 2 columns, found {}", row.len()));
    }

    let timestamp =
        parse_timestamp(&row[0]).ok_or_else(|| format!("invalid timestamp '{}'", &row[0]))?;
    let latency = parse_latency(&row[1])?;

    Ok(Record { timestamp, latency })
}

/// Parse a timestamp column.
///
/// RFC 3339 values keep their offset. Naive date-times are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }
    None
}

fn parse_latency(value: &str) -> std::result::Result<f64, String> {
    let latency: f64 = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid latency '{value}': {err}"))?;
    if !latency.is_finite() {
        return Err(format!("latency '{value}' is not a finite number"));
    }
    Ok(latency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<Series> {
        parse_series(content, Path::new("inline.csv"))
    }

    #[test]
    fn test_parse_preserves_order_and_count() {
        let content = "2024-01-01T00:00:05,3.0\n\
                       2024-01-01T00:00:00,1.0\n\
                       2024-01-01T00:00:02,2.0\n";
        let series = parse(content).unwrap();
        assert_eq!(series.len(), 3);
        let latencies: Vec<f64> = series.records().iter().map(|r| r.latency).collect();
        assert_eq!(latencies, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let series = parse("2024-03-10T12:30:00.250+02:00,42\n").unwrap();
        let record = series.records()[0];
        assert_eq!(record.timestamp.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(record.latency, 42.0);
    }

    #[test]
    fn test_parse_space_separated_naive() {
        let ts = parse_timestamp("2024-01-01 00:00:01.5").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
        assert_eq!(ts.timestamp_millis() % 1000, 500);
    }

    #[test]
    fn test_parse_empty_content() {
        let series = parse("").unwrap();
        assert!(series.is_empty());
        assert_eq!(series.source(), Path::new("inline.csv"));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let series = parse("2024-01-01T00:00:00,1\n\n2024-01-01T00:00:01,2\n").unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_malformed_line_is_identified() {
        let err = parse("2024-01-01T00:00:00,10.0\nnotadate,abc\n").unwrap_err();
        match err {
            PipelineError::MalformedRecord { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "notadate,abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_content_is_the_raw_line() {
        let content = "2024-01-01T00:00:00,10.0\r\n  notadate , \"1\" \r\n";
        let err = parse(content).unwrap_err();
        match err {
            PipelineError::MalformedRecord { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "  notadate , \"1\" ");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_latency_rejected() {
        let err = parse("2024-01-01T00:00:00,fast\n").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedRecord { line: 1, .. }));

        let err = parse("2024-01-01T00:00:00,NaN\n").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedRecord { .. }));
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let err = parse("2024-01-01T00:00:00,1.0,extra\n").unwrap_err();
        match err {
            PipelineError::MalformedRecord { reason, .. } => {
                assert!(reason.contains("expected 2 columns"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_series_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "2024-01-01T00:00:00Z,10.0").unwrap();
        writeln!(file, "2024-01-01T00:00:02Z,15.5").unwrap();

        let series = read_series(file.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.source(), file.path());
    }

    #[test]
    fn test_read_series_missing_file() {
        let err = read_series(Path::new("/nonexistent/latency.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }));
    }
}
