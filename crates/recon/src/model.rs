use std::sync::Arc;

use serde::Serialize;

use crate::config::Field;
use crate::error::RowError;

// ---------------------------------------------------------------------------
// Authoritative side
// ---------------------------------------------------------------------------

/// An employee as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthoritativeRecord {
    #[serde(rename = "codigo")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "genero")]
    pub gender: String,
}

// ---------------------------------------------------------------------------
// External side
// ---------------------------------------------------------------------------

/// One data row of the sheet, keyed by the literal header labels.
#[derive(Debug, Clone)]
pub struct ExternalRawRow {
    /// 1-based line number in the original document.
    pub line: u64,
    pub(crate) headers: Arc<[String]>,
    pub(crate) values: Vec<String>,
}

impl ExternalRawRow {
    pub fn new(line: u64, headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { line, headers, values }
    }

    /// Cell under `header`. Missing trailing cells read as blank.
    pub fn get(&self, header: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == header)?;
        Some(self.values.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// True when the row just repeats the header labels, as happens when a
    /// sheet is pasted together from several blocks.
    pub fn is_repeated_header(&self) -> bool {
        let mut filled = self.iter().filter(|(_, v)| !v.trim().is_empty()).peekable();
        filled.peek().is_some() && filled.all(|(h, v)| h.trim() == v.trim())
    }

    /// (header, cell) pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), self.values.get(i).map(String::as_str).unwrap_or("")))
    }
}

/// A sheet row after aliasing: only canonical cells remain. `None` is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    pub line: u64,
    pub external_id: Option<String>,
    pub role: Option<String>,
    pub salary: Option<String>,
    pub tax_id: Option<String>,
}

impl NormalizedRow {
    pub fn cell(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::ExternalId => &self.external_id,
            Field::Role => &self.role,
            Field::Salary => &self.salary,
            Field::TaxId => &self.tax_id,
        }
    }

    pub fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::ExternalId => &mut self.external_id,
            Field::Role => &mut self.role,
            Field::Salary => &mut self.salary,
            Field::TaxId => &mut self.tax_id,
        }
    }
}

/// An employee as published in the spreadsheet, after cleanup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalRecord {
    #[serde(rename = "matricula")]
    pub external_id: String,
    #[serde(rename = "cargo_contabil")]
    pub role: Option<String>,
    #[serde(rename = "salario")]
    pub salary: Option<f64>,
    /// No sheet column feeds this yet.
    #[serde(rename = "admissao")]
    pub hire_date: Option<String>,
}

/// Everything one pass over the sheet produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetLoad {
    pub records: Vec<ExternalRecord>,
    pub skipped: Vec<RowError>,
    pub rows_read: usize,
    /// Aliased headers the sheet did not have.
    pub missing_columns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One database employee, augmented with spreadsheet data when it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRecord {
    #[serde(rename = "codigo")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "genero")]
    pub gender: String,
    #[serde(rename = "cargo_contabil")]
    pub role: Option<String>,
    #[serde(rename = "salario")]
    pub salary: Option<f64>,
    #[serde(rename = "admissao")]
    pub hire_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub authoritative: usize,
    pub external: usize,
    pub matched: usize,
    pub unmatched: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub summary: ReconSummary,
    pub records: Vec<CombinedRecord>,
    /// Sheet rows dropped on the way in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<RowError>,
}
