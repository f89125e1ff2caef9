use std::collections::HashMap;

use crate::model::{AuthoritativeRecord, CombinedRecord, ExternalRecord};

/// Left join of database employees against sheet records on the identifier.
///
/// Output has exactly one record per authoritative record, in input order.
/// Duplicate sheet identifiers resolve to the last one; sheet records with
/// no database counterpart contribute nothing.
pub fn match_by_id(
    authoritative: &[AuthoritativeRecord],
    external: &[ExternalRecord],
) -> Vec<CombinedRecord> {
    let external_map: HashMap<&str, &ExternalRecord> = external
        .iter()
        .map(|e| (e.external_id.as_str(), e))
        .collect();

    authoritative
        .iter()
        .map(|a| {
            let key = a.id.to_string();
            let matched = external_map.get(key.as_str()).copied();
            combine(a, matched)
        })
        .collect()
}

fn combine(a: &AuthoritativeRecord, e: Option<&ExternalRecord>) -> CombinedRecord {
    CombinedRecord {
        id: a.id,
        name: a.name.clone(),
        tax_id: a.tax_id.clone(),
        gender: a.gender.clone(),
        role: e.and_then(|e| e.role.clone()),
        salary: e.and_then(|e| e.salary),
        hire_date: e.and_then(|e| e.hire_date.clone()),
    }
}
