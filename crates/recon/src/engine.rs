use tracing::{debug, info, warn};

use crate::coerce::coerce_row;
use crate::config::SheetLayout;
use crate::error::{ReconError, RowError, SourceKind};
use crate::evidence::compute_summary;
use crate::fill::FillDown;
use crate::matcher::match_by_id;
use crate::model::{AuthoritativeRecord, ExternalRecord, ReconResult, SheetLoad};
use crate::normalize::normalize_row;
use crate::source::{AuthoritativeSource, ExternalSource};
use crate::table::parse_table;

/// Clean a sheet export into typed records in one pass:
/// parse, alias, repair merged cells, coerce.
///
/// Only a sheet with nothing after its preamble is an error. Bad rows are
/// dropped and reported in [`SheetLoad::skipped`]; repeated header rows and
/// rows with a blank id are dropped before they can feed the merged-cell
/// repair.
pub fn load_sheet(text: &str, layout: &SheetLayout) -> Result<SheetLoad, ReconError> {
    let rows = parse_table(text, layout.skip_rows)?;

    let missing_columns = layout.missing_headers(rows.headers());
    for column in &missing_columns {
        warn!(column = %column, "expected sheet column not found");
    }

    let mut repair = FillDown::new(&layout.fill_columns);
    let mut load = SheetLoad {
        missing_columns,
        ..SheetLoad::default()
    };

    for raw in rows {
        load.rows_read += 1;
        let outcome = raw.and_then(|raw| {
            if raw.is_repeated_header() {
                return Err(RowError::RepeatedHeader { line: raw.line });
            }
            let mut row = normalize_row(&raw, layout);
            // Rows without an id of their own are dropped before repair and
            // never advance the cursors.
            if row.external_id.is_none() {
                return Err(RowError::MissingId { line: row.line });
            }
            repair.apply(&mut row);
            coerce_row(&row)
        });
        match outcome {
            Ok(record) => load.records.push(record),
            Err(e) => {
                debug!(line = e.line(), "skipping sheet row: {e}");
                load.skipped.push(e);
            }
        }
    }

    info!(
        rows = load.rows_read,
        records = load.records.len(),
        skipped = load.skipped.len(),
        "sheet loaded"
    );
    Ok(load)
}

/// Join both record sets. Both must be non-empty.
pub fn run(
    authoritative: &[AuthoritativeRecord],
    external: &[ExternalRecord],
) -> Result<ReconResult, ReconError> {
    if authoritative.is_empty() {
        return Err(ReconError::EmptyResult { source: SourceKind::Authoritative });
    }
    if external.is_empty() {
        return Err(ReconError::EmptyResult { source: SourceKind::External });
    }

    let records = match_by_id(authoritative, external);
    let summary = compute_summary(&records, external);

    Ok(ReconResult {
        summary,
        records,
        skipped: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Database employees as they are. Empty is not an error here.
pub fn authoritative_view(
    source: &dyn AuthoritativeSource,
) -> Result<Vec<AuthoritativeRecord>, ReconError> {
    let records = source.fetch_employees()?;
    if records.is_empty() {
        warn!("database returned no employees");
    }
    Ok(records)
}

/// Cleaned sheet records. A sheet with no data yields an empty load.
pub fn external_view(
    source: &dyn ExternalSource,
    location: &str,
    layout: &SheetLayout,
) -> Result<SheetLoad, ReconError> {
    let text = source.fetch_sheet(location)?;
    match load_sheet(&text, layout) {
        Ok(load) => Ok(load),
        Err(ReconError::EmptyInput { skipped }) => {
            warn!(skipped, "sheet is empty after its preamble");
            Ok(SheetLoad::default())
        }
        Err(e) => Err(e),
    }
}

/// Database employees augmented with sheet data. Fails as a whole when
/// either source is unreachable or has no usable records.
pub fn combined_view(
    authoritative: &dyn AuthoritativeSource,
    external: &dyn ExternalSource,
    location: &str,
    layout: &SheetLayout,
) -> Result<ReconResult, ReconError> {
    let employees = authoritative.fetch_employees()?;
    if employees.is_empty() {
        return Err(ReconError::EmptyResult { source: SourceKind::Authoritative });
    }

    let text = external.fetch_sheet(location)?;
    let load = match load_sheet(&text, layout) {
        Err(ReconError::EmptyInput { .. }) => {
            return Err(ReconError::EmptyResult { source: SourceKind::External })
        }
        other => other?,
    };

    let mut result = run(&employees, &load.records)?;
    result.skipped = load.skipped;

    info!(
        employees = result.summary.authoritative,
        matched = result.summary.matched,
        unmatched = result.summary.unmatched,
        "combined view built"
    );
    Ok(result)
}
