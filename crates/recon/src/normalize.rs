//! Column normalizer: raw header labels to canonical fields.

use crate::config::SheetLayout;
use crate::model::{ExternalRawRow, NormalizedRow};

/// Project a raw row onto the canonical fields of `layout`.
///
/// Unknown columns are dropped without complaint. Blank (empty or
/// whitespace-only) cells become `None`; other cells are kept verbatim.
/// When a header appears twice, its first column wins.
pub fn normalize_row(raw: &ExternalRawRow, layout: &SheetLayout) -> NormalizedRow {
    let mut row = NormalizedRow {
        line: raw.line,
        ..NormalizedRow::default()
    };
    let mut seen = Vec::with_capacity(layout.aliases.len());

    for (header, value) in raw.iter() {
        let Some(field) = layout.field_for(header) else {
            continue;
        };
        if seen.contains(&field) {
            continue;
        }
        seen.push(field);

        if !value.trim().is_empty() {
            *row.slot_mut(field) = Some(value.to_string());
        }
    }

    row
}
