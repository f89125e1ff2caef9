//! Merged-cell repair.
//!
//! A spreadsheet UI shows one value across a merged block, but the export
//! only writes it into the block's first row. Blank cells in the configured
//! columns are filled with the last non-blank value seen above them.
//! Order-sensitive: rows must be fed top to bottom.

use crate::config::Field;
use crate::model::NormalizedRow;

/// Per-column "last non-blank value" cursors.
#[derive(Debug, Clone)]
pub struct FillDown {
    cursors: Vec<(Field, Option<String>)>,
}

impl FillDown {
    pub fn new(columns: &[Field]) -> Self {
        Self {
            cursors: columns.iter().map(|f| (*f, None)).collect(),
        }
    }

    /// Repair `row` in place and advance the cursors.
    pub fn apply(&mut self, row: &mut NormalizedRow) {
        for (field, last) in &mut self.cursors {
            let slot = row.slot_mut(*field);
            if slot.is_some() {
                last.clone_from(slot);
            } else {
                slot.clone_from(last);
            }
        }
    }
}

/// Forward-fill `columns` over a whole ordered batch.
pub fn fill_down(rows: &mut [NormalizedRow], columns: &[Field]) {
    let mut repair = FillDown::new(columns);
    for row in rows.iter_mut() {
        repair.apply(row);
    }
}
