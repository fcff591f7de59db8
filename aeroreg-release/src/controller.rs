//! Release controller: validate → confirm → backup → promote → stamp, and
//! the inverse restore-from-backup path.
//!
//! The promotion is copy-then-stamp, which is not atomic against a crash
//! between the two steps; retrying the promotion is idempotent (the stamp
//! is simply overwritten), so the window is tolerated. Each individual file
//! write goes through the store's tmp+rename path.

use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};

use aeroreg_core::{store, validate, RegistryDocument, ValidationMode};

use crate::error::{release_err, rollback_err, ReleaseError, RollbackError};

/// Backup file name prefix; the rest is a `%Y%m%d_%H%M%S` timestamp.
const BACKUP_PREFIX: &str = "aerodromes_backup_";

/// At most this many backups are offered as rollback candidates.
pub const MAX_ROLLBACK_CANDIDATES: usize = 5;

// ---------------------------------------------------------------------------
// Confirmation capability
// ---------------------------------------------------------------------------

/// An injected yes/no decision, so destructive paths are testable without a
/// terminal.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

// ---------------------------------------------------------------------------
// Promote
// ---------------------------------------------------------------------------

/// Outcome of a successful promotion.
#[derive(Debug)]
pub struct Released {
    /// The production document as stamped.
    pub document: RegistryDocument,
    /// Backup of the prior production artifact, if one existed.
    pub backup: Option<PathBuf>,
}

/// Promote the staging artifact into the production slot.
///
/// Aborts before any mutation on a missing staging file, a strict
/// validation failure, or a declined confirmation (`force` bypasses the
/// confirmation only). A pre-existing production artifact is copied
/// byte-for-byte into the backup directory before being replaced.
pub fn promote(
    root: &Path,
    force: bool,
    confirm: &mut dyn Confirm,
) -> Result<Released, ReleaseError> {
    let staging = store::staging_path(root);
    let production = store::production_path(root);

    if !staging.exists() {
        return Err(ReleaseError::SourceMissing(staging));
    }

    let value = store::load_value(&staging)?;
    if let Err(issues) = validate(&value, ValidationMode::Strict) {
        return Err(ReleaseError::ValidationFailed(issues));
    }

    if !force && !confirm.confirm("Proceed with release? This replaces the production registry.") {
        return Err(ReleaseError::Cancelled);
    }

    let backup = backup_production(root, &production)?;
    if let Some(path) = &backup {
        tracing::info!("production backup created: {}", path.display());
    }

    // Copy staging over production, then stamp released_at in place.
    std::fs::copy(&staging, &production).map_err(|e| release_err(&production, e))?;
    let mut document = store::load_document(&production)?;
    document.released_at = Some(Local::now().to_rfc3339_opts(SecondsFormat::Secs, false));
    store::save_document(&production, &document)?;

    tracing::info!(
        "released {} aerodromes to production",
        document.total_count
    );
    Ok(Released { document, backup })
}

/// Snapshot the current production artifact, if any, into the backup
/// directory. First releases have nothing to back up.
fn backup_production(root: &Path, production: &Path) -> Result<Option<PathBuf>, ReleaseError> {
    if !production.exists() {
        return Ok(None);
    }

    let dir = store::backups_dir(root);
    std::fs::create_dir_all(&dir).map_err(|e| release_err(&dir, e))?;

    // Whole-second resolution is enough: promotions are operator-paced.
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup = dir.join(format!("{BACKUP_PREFIX}{timestamp}.json"));
    std::fs::copy(production, &backup).map_err(|e| release_err(&backup, e))?;
    Ok(Some(backup))
}

// ---------------------------------------------------------------------------
// Rollback
// ---------------------------------------------------------------------------

/// Every backup file, most recent first.
///
/// The embedded timestamp sorts lexicographically, so reverse name order is
/// reverse-chronological order.
pub fn list_backups(root: &Path) -> Result<Vec<PathBuf>, RollbackError> {
    let dir = store::backups_dir(root);
    if !dir.exists() {
        return Err(RollbackError::NoBackupsFound);
    }

    let mut backups: Vec<PathBuf> = std::fs::read_dir(&dir)
        .map_err(|e| rollback_err(&dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(BACKUP_PREFIX) && n.ends_with(".json"))
        })
        .collect();
    if backups.is_empty() {
        return Err(RollbackError::NoBackupsFound);
    }
    backups.sort();
    backups.reverse();
    Ok(backups)
}

/// The newest backups, capped at [`MAX_ROLLBACK_CANDIDATES`].
pub fn rollback_candidates(root: &Path) -> Result<Vec<PathBuf>, RollbackError> {
    let mut backups = list_backups(root)?;
    backups.truncate(MAX_ROLLBACK_CANDIDATES);
    Ok(backups)
}

/// Restore the production slot from the backup at `selection` (an index
/// into [`rollback_candidates`]).
///
/// The backup is copied over production verbatim — no re-stamping — so the
/// restored file is byte-identical to the snapshot. Invalid selections and
/// declined confirmations leave production untouched.
pub fn rollback(
    root: &Path,
    selection: usize,
    confirm: &mut dyn Confirm,
) -> Result<PathBuf, RollbackError> {
    let candidates = rollback_candidates(root)?;
    let chosen = candidates
        .get(selection)
        .ok_or(RollbackError::InvalidSelection(selection))?;

    let name = chosen
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !confirm.confirm(&format!("Replace production with {name}?")) {
        return Err(RollbackError::Cancelled);
    }

    let production = store::production_path(root);
    std::fs::copy(chosen, &production).map_err(|e| rollback_err(&production, e))?;
    tracing::info!("rolled back to {name}");
    Ok(chosen.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use aeroreg_core::{AerodromeRecord, Icao};
    use tempfile::TempDir;

    fn yes() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    fn no() -> impl FnMut(&str) -> bool {
        |_: &str| false
    }

    fn staging_doc(version: &str) -> RegistryDocument {
        RegistryDocument::new(
            version.to_string(),
            "2024-01-01T00:00:00+00:00".to_string(),
            vec![AerodromeRecord {
                icao: Icao::from("KJFK"),
                name: "John F Kennedy".to_string(),
                country: "US".to_string(),
                timezone: "America/New_York".to_string(),
            }],
        )
    }

    fn write_staging(root: &Path, version: &str) {
        store::save_document(&store::staging_path(root), &staging_doc(version)).expect("save");
    }

    #[test]
    fn missing_staging_is_source_missing() {
        let root = TempDir::new().expect("tempdir");
        let err = promote(root.path(), true, &mut yes()).unwrap_err();
        assert!(matches!(err, ReleaseError::SourceMissing(_)));
    }

    #[test]
    fn first_release_creates_no_backup_and_stamps() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");

        let released = promote(root.path(), true, &mut yes()).expect("promote");
        assert!(released.backup.is_none());
        assert!(released.document.released_at.is_some());

        let prod = store::load_document(&store::production_path(root.path())).expect("load");
        assert_eq!(prod.version, "1.0.0");
        assert!(prod.released_at.is_some());
    }

    #[test]
    fn second_release_backs_up_prior_production() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");
        promote(root.path(), true, &mut yes()).expect("first promote");
        let first_prod =
            std::fs::read(store::production_path(root.path())).expect("read production");

        write_staging(root.path(), "1.1.0");
        let released = promote(root.path(), true, &mut yes()).expect("second promote");

        let backup = released.backup.expect("backup created");
        let backup_bytes = std::fs::read(&backup).expect("read backup");
        assert_eq!(backup_bytes, first_prod, "backup must be byte-for-byte");
    }

    #[test]
    fn validation_failure_leaves_production_untouched() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");
        promote(root.path(), true, &mut yes()).expect("seed production");
        let before = std::fs::read(store::production_path(root.path())).expect("read");

        // Corrupt the staging count.
        let staging = store::staging_path(root.path());
        let mut doc = staging_doc("9.9.9");
        doc.total_count = 42;
        let json = serde_json::to_string_pretty(&doc).expect("serialize");
        std::fs::write(&staging, json).expect("write");

        let err = promote(root.path(), true, &mut yes()).unwrap_err();
        assert!(matches!(err, ReleaseError::ValidationFailed(_)));

        let after = std::fs::read(store::production_path(root.path())).expect("read");
        assert_eq!(after, before, "rejected release must not touch production");
    }

    #[test]
    fn declined_confirmation_cancels_without_mutation() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");

        let err = promote(root.path(), false, &mut no()).unwrap_err();
        assert!(matches!(err, ReleaseError::Cancelled));
        assert!(!store::production_path(root.path()).exists());
    }

    #[test]
    fn force_bypasses_confirmation() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");
        promote(root.path(), true, &mut no()).expect("forced promote");
    }

    #[test]
    fn retry_is_idempotent_modulo_stamp() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");

        let first = promote(root.path(), true, &mut yes()).expect("first");
        let second = promote(root.path(), true, &mut yes()).expect("retry");

        let mut a = first.document;
        let mut b = second.document;
        a.released_at = None;
        b.released_at = None;
        assert_eq!(a, b, "retry may differ only in released_at");
    }

    #[test]
    fn rollback_restores_byte_identical_production() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");
        promote(root.path(), true, &mut yes()).expect("first promote");
        let first_prod =
            std::fs::read(store::production_path(root.path())).expect("read production");

        write_staging(root.path(), "2.0.0");
        promote(root.path(), true, &mut yes()).expect("second promote");

        let restored_from = rollback(root.path(), 0, &mut yes()).expect("rollback");
        let prod = std::fs::read(store::production_path(root.path())).expect("read");
        assert_eq!(prod, first_prod);
        assert_eq!(prod, std::fs::read(&restored_from).expect("read backup"));
    }

    #[test]
    fn rollback_without_backups_errors() {
        let root = TempDir::new().expect("tempdir");
        let err = rollback(root.path(), 0, &mut yes()).unwrap_err();
        assert!(matches!(err, RollbackError::NoBackupsFound));
    }

    #[test]
    fn rollback_invalid_selection_leaves_production() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");
        promote(root.path(), true, &mut yes()).expect("first");
        write_staging(root.path(), "2.0.0");
        promote(root.path(), true, &mut yes()).expect("second");
        let before = std::fs::read(store::production_path(root.path())).expect("read");

        let err = rollback(root.path(), 99, &mut yes()).unwrap_err();
        assert!(matches!(err, RollbackError::InvalidSelection(99)));
        let after = std::fs::read(store::production_path(root.path())).expect("read");
        assert_eq!(after, before);
    }

    #[test]
    fn rollback_declined_confirmation_cancels() {
        let root = TempDir::new().expect("tempdir");
        write_staging(root.path(), "1.0.0");
        promote(root.path(), true, &mut yes()).expect("first");
        write_staging(root.path(), "2.0.0");
        promote(root.path(), true, &mut yes()).expect("second");

        let err = rollback(root.path(), 0, &mut no()).unwrap_err();
        assert!(matches!(err, RollbackError::Cancelled));
    }

    #[test]
    fn candidates_capped_and_newest_first() {
        let root = TempDir::new().expect("tempdir");
        let dir = store::backups_dir(root.path());
        std::fs::create_dir_all(&dir).expect("mkdir");
        for i in 0..7 {
            std::fs::write(
                dir.join(format!("aerodromes_backup_2024010{i}_000000.json")),
                format!("{{\"n\": {i}}}"),
            )
            .expect("write");
        }

        let candidates = rollback_candidates(root.path()).expect("candidates");
        assert_eq!(candidates.len(), MAX_ROLLBACK_CANDIDATES);
        assert!(candidates[0]
            .file_name()
            .unwrap()
            .to_string_lossy()
            .contains("20240106"));
    }

    #[test]
    fn list_backups_ignores_foreign_files() {
        let root = TempDir::new().expect("tempdir");
        let dir = store::backups_dir(root.path());
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("notes.txt"), "x").expect("write");
        std::fs::write(dir.join("aerodromes_backup_20240101_000000.json"), "{}")
            .expect("write");

        let backups = list_backups(root.path()).expect("list");
        assert_eq!(backups.len(), 1);
    }
}
