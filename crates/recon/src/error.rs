use std::fmt;

use serde::Serialize;

/// Which side of the reconciliation a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The database (system of record).
    Authoritative,
    /// The published spreadsheet export.
    External,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authoritative => write!(f, "database"),
            Self::External => write!(f, "spreadsheet"),
        }
    }
}

#[derive(Debug)]
pub enum ReconError {
    /// Nothing left to parse once the preamble lines were skipped.
    EmptyInput { skipped: usize },
    /// A source could not be reached or refused the request.
    SourceUnavailable { source: SourceKind, message: String },
    /// A source produced zero usable records where records are required.
    EmptyResult { source: SourceKind },
    /// TOML parse / deserialization error in a sheet layout.
    LayoutParse(String),
    /// Sheet layout validation error.
    LayoutValidation(String),
    /// Any other fault while reading the sheet.
    Unexpected(String),
}

impl ReconError {
    pub fn unavailable(source: SourceKind, message: impl Into<String>) -> Self {
        Self::SourceUnavailable { source, message: message.into() }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { skipped } => {
                write!(f, "sheet has no header row after skipping {skipped} line(s)")
            }
            Self::SourceUnavailable { source, message } => {
                write!(f, "{source} unavailable: {message}")
            }
            Self::EmptyResult { source } => write!(f, "{source} returned no usable records"),
            Self::LayoutParse(msg) => write!(f, "layout parse error: {msg}"),
            Self::LayoutValidation(msg) => write!(f, "layout validation error: {msg}"),
            Self::Unexpected(msg) => write!(f, "unexpected error reading sheet: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

/// Why a single sheet row was left out of the external record set.
///
/// Row errors are recovered locally: the row is dropped and the batch goes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    /// The CSV reader could not decode the row.
    Malformed { line: u64, message: String },
    /// The row repeats the header labels.
    RepeatedHeader { line: u64 },
    /// Identifier cell is blank; the row is never merged into the one above.
    MissingId { line: u64 },
    /// Identifier is not a number.
    InvalidId { line: u64, value: String },
    /// Salary text is not a non-negative decimal.
    InvalidSalary { line: u64, value: String },
}

impl RowError {
    pub fn line(&self) -> u64 {
        match self {
            Self::Malformed { line, .. }
            | Self::RepeatedHeader { line }
            | Self::MissingId { line }
            | Self::InvalidId { line, .. }
            | Self::InvalidSalary { line, .. } => *line,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { line, message } => write!(f, "line {line}: malformed row: {message}"),
            Self::RepeatedHeader { line } => write!(f, "line {line}: repeated header row"),
            Self::MissingId { line } => write!(f, "line {line}: missing identifier"),
            Self::InvalidId { line, value } => {
                write!(f, "line {line}: cannot parse identifier '{value}'")
            }
            Self::InvalidSalary { line, value } => {
                write!(f, "line {line}: cannot parse salary '{value}'")
            }
        }
    }
}

impl std::error::Error for RowError {}
