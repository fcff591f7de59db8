//! Canonical sync pipeline: sources → staging artifact.
//!
//! Takes pre-fetched [`SourceData`] so the CLI fetches over the network
//! while tests feed literal strings.

use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};

use aeroreg_core::{store, validate, ValidationMode};

use crate::error::SyncError;
use crate::fetch::SourceData;
use crate::normalize::{primary_airports, secondary_timezones};
use crate::overrides;
use crate::reconcile::{reconcile, DocumentMeta, MergeStats};

/// Outcome of one sync run, for CLI display.
#[derive(Debug)]
pub struct SyncReport {
    pub staging_path: PathBuf,
    pub total_count: usize,
    pub primary_count: usize,
    pub secondary_count: usize,
    pub stats: MergeStats,
}

/// Rebuild the staging artifact from the given source data.
///
/// Each sync is a full rebuild; the previous staging artifact is replaced
/// atomically. Production is never touched here.
pub fn run(root: &Path, sources: &SourceData) -> Result<SyncReport, SyncError> {
    let airports = primary_airports(&sources.primary_csv);
    tracing::info!("found {} airports with ICAO codes", airports.len());

    let timezones = secondary_timezones(&sources.secondary_dat);
    tracing::info!("found {} airports with timezone data", timezones.len());

    let override_records = overrides::load(root)?;

    let meta = DocumentMeta {
        version: store::read_version(root),
        last_updated: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
    };
    let (document, stats) = reconcile(&airports, &timezones, &override_records, meta);

    let staging_path = store::staging_path(root);
    store::save_document(&staging_path, &document)?;
    tracing::info!("staging registry saved to {}", staging_path.display());

    // Cheap sample check of the written artifact; the release path runs the
    // strict form before promotion.
    let written = store::load_value(&staging_path)?;
    if let Err(issues) = validate(&written, ValidationMode::Lightweight) {
        return Err(SyncError::StagingInvalid(issues));
    }

    Ok(SyncReport {
        staging_path,
        total_count: document.total_count,
        primary_count: airports.len(),
        secondary_count: timezones.len(),
        stats,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
