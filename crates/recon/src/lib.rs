//! `colab-recon` — employee record reconciliation.
//!
//! Pure engine crate: cleans a human-maintained spreadsheet export into typed
//! records and left-joins them onto database employees. Sources are reached
//! through the traits in [`source`]; no network or database code lives here.

pub mod coerce;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod fill;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod source;
pub mod table;

pub use config::{Field, SheetLayout};
pub use engine::{authoritative_view, combined_view, external_view, load_sheet, run};
pub use error::{ReconError, RowError, SourceKind};
pub use model::{
    AuthoritativeRecord, CombinedRecord, ExternalRecord, ReconResult, ReconSummary, SheetLoad,
};
pub use source::{AuthoritativeSource, ExternalSource};
