use std::collections::HashSet;

use crate::model::{CombinedRecord, ExternalRecord, ReconSummary};

/// Count how the join went. A combined record counts as matched when its
/// identifier exists among the sheet records.
pub fn compute_summary(combined: &[CombinedRecord], external: &[ExternalRecord]) -> ReconSummary {
    let external_ids: HashSet<&str> = external.iter().map(|e| e.external_id.as_str()).collect();

    let matched = combined
        .iter()
        .filter(|c| external_ids.contains(c.id.to_string().as_str()))
        .count();

    ReconSummary {
        authoritative: combined.len(),
        external: external.len(),
        matched,
        unmatched: combined.len() - matched,
    }
}
