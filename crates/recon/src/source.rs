//! Seams to the systems the pipeline reads from.
//!
//! Implementations own connection details and are built once from settings;
//! the pipeline only sees already-fetched rows and text.

use crate::error::ReconError;
use crate::model::AuthoritativeRecord;

/// The database of record.
pub trait AuthoritativeSource {
    /// Active employees, already filtered of non-employee entries.
    fn fetch_employees(&self) -> Result<Vec<AuthoritativeRecord>, ReconError>;
}

/// The published spreadsheet.
pub trait ExternalSource {
    /// Raw CSV text found at `location`.
    fn fetch_sheet(&self, location: &str) -> Result<String, ReconError>;
}
