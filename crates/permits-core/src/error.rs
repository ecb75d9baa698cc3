use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PermitsError {
    #[error("file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("required column not found in header: '{0}'")]
    MissingColumn(String),

    #[error("line {line}: column '{column}' value '{value}' does not match format '{expected}'")]
    MalformedField {
        line: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid workday: {0}")]
    InvalidWorkday(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl From<rust_xlsxwriter::XlsxError> for PermitsError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        PermitsError::Spreadsheet(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PermitsError>;
