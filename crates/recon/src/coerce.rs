//! Field coercion: repaired text cells to a typed `ExternalRecord`.
//!
//! Any failure drops the whole row. A row without a usable identifier
//! cannot take part in the join, and a row with a corrupted salary is not
//! trusted for its other fields either.

use crate::error::RowError;
use crate::model::{ExternalRecord, NormalizedRow};

/// Turn one repaired row into a record, or say why it was dropped.
pub fn coerce_row(row: &NormalizedRow) -> Result<ExternalRecord, RowError> {
    let raw_id = row
        .external_id
        .as_deref()
        .ok_or(RowError::MissingId { line: row.line })?;
    let external_id = parse_external_id(raw_id).ok_or_else(|| RowError::InvalidId {
        line: row.line,
        value: raw_id.to_string(),
    })?;

    let salary = match row.salary.as_deref() {
        Some(text) => Some(parse_locale_decimal(text).ok_or_else(|| RowError::InvalidSalary {
            line: row.line,
            value: text.to_string(),
        })?),
        None => None,
    };

    Ok(ExternalRecord {
        external_id,
        role: row.role.clone(),
        salary,
        hire_date: None,
    })
}

/// Identifier cells hold numbers, sometimes with fractional noise
/// (`"42.0"`). The integer part, rendered as text, is the join key.
pub fn parse_external_id(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n.to_string());
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return None;
    }
    Some((value.trunc() as i64).to_string())
}

/// Parse a `1.234,56`-style amount: `.` groups thousands, `,` marks decimals.
/// Negative and non-finite values are rejected.
pub fn parse_locale_decimal(text: &str) -> Option<f64> {
    let normalized: String = text
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    // f64::from_str also accepts "inf" / "nan"; only plain digits are amounts
    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
    {
        return None;
    }

    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value)
}
