//! Reconciliation engine.
//!
//! Merges the primary airport facts, the secondary timezone lookup, and the
//! operator override list into one canonical record set under an explicit
//! precedence policy:
//!
//! 1. override + primary — override fields patch the primary-derived record
//!    field by field; an omitted override timezone becomes `"UTC"`.
//! 2. primary only — timezone from the secondary lookup, else the country
//!    fallback table.
//! 3. override only — admitted as a brand-new record built purely from the
//!    override's own fields.
//!
//! The registry is always fully populated: every admitted record ends up
//! with a non-empty timezone, `"UTC"` being the floor.

use std::collections::{BTreeMap, HashMap, HashSet};

use aeroreg_core::{AerodromeRecord, Icao, OverrideRecord, RegistryDocument};

use crate::fallback::fallback_timezone;
use crate::normalize::AirportFacts;

/// Diagnostic counters for one reconciliation run.
///
/// Returned alongside the document; callers aggregate and report as needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Timezone resolved via the secondary lookup.
    pub matched: usize,
    /// Timezone resolved via the country fallback table.
    pub fallback: usize,
    /// Existing primary record patched by an override.
    pub overridden: usize,
    /// New record introduced purely by an override.
    pub overrides: usize,
}

/// Caller-supplied document metadata — never computed here.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub version: String,
    pub last_updated: String,
}

/// Merge all sources into a staging registry document.
///
/// Output is sorted ascending by ICAO code regardless of input order, and
/// `total_count` always equals the record count.
pub fn reconcile(
    primary: &BTreeMap<Icao, AirportFacts>,
    secondary: &HashMap<Icao, String>,
    overrides: &[OverrideRecord],
    meta: DocumentMeta,
) -> (RegistryDocument, MergeStats) {
    let mut stats = MergeStats::default();

    let override_lookup: HashMap<&Icao, &OverrideRecord> =
        overrides.iter().map(|o| (&o.icao, o)).collect();

    let mut records = Vec::with_capacity(primary.len());
    for (icao, facts) in primary {
        let record = if let Some(patch) = override_lookup.get(icao) {
            stats.overridden += 1;
            tracing::info!("overriding {icao} with custom data");
            AerodromeRecord {
                icao: icao.clone(),
                name: patch.name.clone().unwrap_or_else(|| facts.name.clone()),
                country: patch
                    .country
                    .clone()
                    .unwrap_or_else(|| facts.country_code.clone()),
                timezone: patch.timezone.clone().unwrap_or_else(|| "UTC".to_string()),
            }
        } else {
            let timezone = match secondary.get(icao) {
                Some(tz) => {
                    stats.matched += 1;
                    tz.clone()
                }
                None => {
                    stats.fallback += 1;
                    fallback_timezone(&facts.country_code).to_string()
                }
            };
            AerodromeRecord {
                icao: icao.clone(),
                name: facts.name.clone(),
                country: facts.country_code.clone(),
                timezone,
            }
        };
        records.push(record);
    }

    // Overrides whose key is absent from the primary feed become new
    // records. Repeated keys collapse to one record (last occurrence wins,
    // matching the patch lookup above) so the uniqueness invariant holds
    // for any input.
    let mut admitted = HashSet::new();
    for entry in overrides {
        if primary.contains_key(&entry.icao) {
            continue;
        }
        if !admitted.insert(&entry.icao) {
            tracing::warn!("skipping duplicate override entry for {}", entry.icao);
            continue;
        }
        let patch = override_lookup[&entry.icao];
        stats.overrides += 1;
        tracing::info!("adding new aerodrome {} from overrides", patch.icao);
        records.push(AerodromeRecord {
            icao: patch.icao.clone(),
            name: patch.name.clone().unwrap_or_default(),
            country: patch.country.clone().unwrap_or_default(),
            timezone: patch.timezone.clone().unwrap_or_else(|| "UTC".to_string()),
        });
    }

    records.sort_by(|a, b| a.icao.cmp(&b.icao));

    (
        RegistryDocument::new(meta.version, meta.last_updated, records),
        stats,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
