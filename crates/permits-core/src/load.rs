//! Reading attendance exports.
//!
//! Rows are evaluated in a fixed order: rows with a blank entry or exit time are
//! dropped before anything is parsed, then the date is parsed and filtered, and
//! only rows inside the range have their timestamps parsed.

use crate::config::{ColumnMap, Config};
use crate::error::{PermitsError, Result};
use crate::range::DateRange;
use crate::record::{
    non_blank, parse_date, parse_timestamp, AttendanceRecord, DATE_FORMAT, TIMESTAMP_FORMAT,
};
use encoding_rs::Encoding;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// What to do with a row whose mandatory date or time cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Fail the whole run on the first malformed row.
    #[default]
    Abort,
    /// Drop the row and record it in [`LoadReport::issues`].
    Skip,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub columns: ColumnMap,
    pub encoding: String,
    pub range: DateRange,
    pub policy: RowPolicy,
}

impl LoadOptions {
    pub fn from_config(config: &Config, range: DateRange, policy: RowPolicy) -> Self {
        Self {
            columns: config.columns.clone(),
            encoding: config.encoding.clone(),
            range,
            policy,
        }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from_config(&Config::default(), DateRange::all(), RowPolicy::Abort)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RowIssue {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<AttendanceRecord>,
    pub skipped_blank: usize,
    pub filtered_out: usize,
    pub issues: Vec<RowIssue>,
}

/// Decode raw bytes with the given WHATWG label. A byte-order mark takes precedence.
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| PermitsError::UnknownEncoding(label.to_string()))?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if used != encoding {
        debug!(encoding = used.name(), "byte-order mark overrides configured encoding");
    }
    if had_errors {
        warn!(encoding = used.name(), "input contains bytes invalid for encoding; replaced");
    }
    Ok(text.into_owned())
}

pub fn read_records(path: &Path, opts: &LoadOptions) -> Result<LoadReport> {
    let bytes = crate::io::read_all(path)?;
    let text = decode(&bytes, &opts.encoding)?;
    parse_text(&text, opts)
}

struct ColumnIndex {
    date: usize,
    actual_in: usize,
    actual_out: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnMap) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name.trim())
                .ok_or_else(|| PermitsError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            date: find(&columns.date)?,
            actual_in: find(&columns.actual_in)?,
            actual_out: find(&columns.actual_out)?,
        })
    }
}

enum Row {
    Blank,
    OutOfRange,
    Record(AttendanceRecord),
}

pub fn parse_text(text: &str, opts: &LoadOptions) -> Result<LoadReport> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let index = ColumnIndex::resolve(reader.headers()?, &opts.columns)?;
    let mut report = LoadReport::default();

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let line = row.position().map_or(i + 2, |p| p.line() as usize);

        match parse_row(&row, line, &index, opts) {
            Ok(Row::Blank) => report.skipped_blank += 1,
            Ok(Row::OutOfRange) => report.filtered_out += 1,
            Ok(Row::Record(record)) => report.records.push(record),
            Err(e @ PermitsError::MalformedField { .. }) if opts.policy == RowPolicy::Skip => {
                warn!(line, "skipping malformed row: {e}");
                report.issues.push(RowIssue {
                    line,
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        records = report.records.len(),
        blank = report.skipped_blank,
        filtered = report.filtered_out,
        issues = report.issues.len(),
        "attendance file parsed"
    );
    Ok(report)
}

fn parse_row(
    row: &csv::StringRecord,
    line: usize,
    index: &ColumnIndex,
    opts: &LoadOptions,
) -> Result<Row> {
    let cols = &opts.columns;
    let (Some(raw_in), Some(raw_out)) = (
        non_blank(row.get(index.actual_in)),
        non_blank(row.get(index.actual_out)),
    ) else {
        return Ok(Row::Blank);
    };

    let raw_date = row.get(index.date).unwrap_or("");
    let date =
        parse_date(raw_date).ok_or_else(|| malformed(line, &cols.date, raw_date, DATE_FORMAT))?;
    if !opts.range.contains(date) {
        return Ok(Row::OutOfRange);
    }

    let actual_in = parse_timestamp(raw_in)
        .ok_or_else(|| malformed(line, &cols.actual_in, raw_in, TIMESTAMP_FORMAT))?;
    let actual_out = parse_timestamp(raw_out)
        .ok_or_else(|| malformed(line, &cols.actual_out, raw_out, TIMESTAMP_FORMAT))?;

    Ok(Row::Record(AttendanceRecord {
        line,
        date,
        actual_in: Some(actual_in),
        actual_out: Some(actual_out),
    }))
}

fn malformed(line: usize, column: &str, value: &str, expected: &'static str) -> PermitsError {
    PermitsError::MalformedField {
        line,
        column: column.to_string(),
        value: value.to_string(),
        expected,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
