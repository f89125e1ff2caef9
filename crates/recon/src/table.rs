//! Tabular parser: preamble skip, header row, positional data rows.

use std::sync::Arc;

use crate::error::{ReconError, RowError};
use crate::model::ExternalRawRow;

/// Lazy, single-pass sequence of data rows under one header.
pub struct RawRows<'a> {
    headers: Arc<[String]>,
    records: csv::StringRecordsIntoIter<&'a [u8]>,
    line_offset: u64,
}

impl std::fmt::Debug for RawRows<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawRows")
            .field("headers", &self.headers)
            .field("line_offset", &self.line_offset)
            .finish_non_exhaustive()
    }
}

impl RawRows<'_> {
    /// Header labels as they appear in the sheet.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for RawRows<'_> {
    type Item = Result<ExternalRawRow, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(match record {
            Ok(record) => {
                let line = self.line_offset + record.position().map(|p| p.line()).unwrap_or(0);
                let values = record.iter().map(str::to_string).collect();
                Ok(ExternalRawRow::new(line, Arc::clone(&self.headers), values))
            }
            Err(e) => Err(RowError::Malformed {
                line: self.line_offset + e.position().map(|p| p.line()).unwrap_or(0),
                message: e.to_string(),
            }),
        })
    }
}

/// Drop the first `skip` lines of `text` and read what is left as CSV with a
/// header row. Rows shorter than the header read their missing cells as blank;
/// cells beyond the header are ignored.
pub fn parse_table(text: &str, skip: usize) -> Result<RawRows<'_>, ReconError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = skip_lines(text, skip);

    if rest.trim().is_empty() {
        return Err(ReconError::EmptyInput { skipped: skip });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(rest.as_bytes());

    let headers: Arc<[String]> = reader
        .headers()
        .map_err(|e| ReconError::Unexpected(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    Ok(RawRows {
        headers,
        records: reader.into_records(),
        line_offset: skip as u64,
    })
}

fn skip_lines(text: &str, skip: usize) -> &str {
    let mut rest = text;
    for _ in 0..skip {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}
