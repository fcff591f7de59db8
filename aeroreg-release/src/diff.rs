//! Registry snapshot comparison for pre-release review.
//!
//! Purely read-only; the report informs the operator and never gates
//! promotion.

use std::collections::BTreeMap;

use aeroreg_core::{AerodromeRecord, Icao, RegistryDocument};

/// One field-level change on a record present in both snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub before: String,
    pub after: String,
}

/// A record that exists in both snapshots but differs structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordChange {
    pub icao: Icao,
    pub name: String,
    pub fields: Vec<FieldChange>,
}

/// Advisory warning thresholds for large change sets.
#[derive(Debug, Clone, Copy)]
pub struct DiffThresholds {
    pub added_warn: usize,
    pub removed_warn: usize,
}

impl Default for DiffThresholds {
    fn default() -> Self {
        Self {
            added_warn: 1000,
            removed_warn: 100,
        }
    }
}

/// Set-difference between two registry snapshots, keyed by ICAO code.
#[derive(Debug, Clone, Default)]
pub struct DiffReport {
    /// In staging but not production, sorted.
    pub added: Vec<Icao>,
    /// In production but not staging, sorted.
    pub removed: Vec<Icao>,
    /// In both but structurally different, sorted, with field detail.
    pub changed: Vec<RecordChange>,
    /// Advisory only — large change sets worth a second look.
    pub warnings: Vec<String>,
}

impl DiffReport {
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

fn by_icao(doc: &RegistryDocument) -> BTreeMap<&Icao, &AerodromeRecord> {
    doc.aerodromes.iter().map(|r| (&r.icao, r)).collect()
}

fn field_changes(before: &AerodromeRecord, after: &AerodromeRecord) -> Vec<FieldChange> {
    let pairs = [
        ("name", &before.name, &after.name),
        ("country", &before.country, &after.country),
        ("timezone", &before.timezone, &after.timezone),
    ];
    pairs
        .into_iter()
        .filter(|(_, b, a)| b != a)
        .map(|(field, b, a)| FieldChange {
            field,
            before: b.clone(),
            after: a.clone(),
        })
        .collect()
}

/// Compare production against staging.
///
/// Equality for "changed" is whole-record structural equality; any field
/// difference counts.
pub fn diff(
    prod: &RegistryDocument,
    staging: &RegistryDocument,
    thresholds: &DiffThresholds,
) -> DiffReport {
    let prod_map = by_icao(prod);
    let staging_map = by_icao(staging);

    let added: Vec<Icao> = staging_map
        .keys()
        .filter(|icao| !prod_map.contains_key(*icao))
        .map(|icao| (*icao).clone())
        .collect();
    let removed: Vec<Icao> = prod_map
        .keys()
        .filter(|icao| !staging_map.contains_key(*icao))
        .map(|icao| (*icao).clone())
        .collect();

    let mut changed = Vec::new();
    for (icao, before) in &prod_map {
        if let Some(after) = staging_map.get(*icao) {
            if before != after {
                changed.push(RecordChange {
                    icao: (*icao).clone(),
                    name: after.name.clone(),
                    fields: field_changes(before, after),
                });
            }
        }
    }

    let mut warnings = Vec::new();
    if added.len() > thresholds.added_warn {
        warnings.push(format!(
            "{} aerodromes added - large data update",
            added.len()
        ));
    }
    if removed.len() > thresholds.removed_warn {
        warnings.push(format!(
            "{} aerodromes removed - verify this is expected",
            removed.len()
        ));
    }

    DiffReport {
        added,
        removed,
        changed,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
