//! Registry artifact store.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   VERSION                      (plain-text semantic version)
//!   aerodromes-staging.json      (staging artifact, owned by sync)
//!   aerodromes.json              (production artifact, owned by release)
//!   backups/
//!     aerodromes_backup_<ts>.json
//!   modifications/
//!     overrides/*.json
//! ```
//!
//! Every function takes an explicit `root: &Path` so tests run against a
//! `TempDir`; the CLI passes the current working directory.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::RegistryError;
use crate::types::RegistryDocument;

/// Default version string when no `VERSION` file exists.
const DEFAULT_VERSION: &str = "1.0.0";

// ---------------------------------------------------------------------------
// 1. Path helpers (pure, no I/O)
// ---------------------------------------------------------------------------

/// `<root>/aerodromes-staging.json`
pub fn staging_path(root: &Path) -> PathBuf {
    root.join("aerodromes-staging.json")
}

/// `<root>/aerodromes.json`
pub fn production_path(root: &Path) -> PathBuf {
    root.join("aerodromes.json")
}

/// `<root>/backups/`
pub fn backups_dir(root: &Path) -> PathBuf {
    root.join("backups")
}

/// `<root>/modifications/overrides/`
pub fn overrides_dir(root: &Path) -> PathBuf {
    root.join("modifications").join("overrides")
}

/// `<root>/VERSION`
pub fn version_path(root: &Path) -> PathBuf {
    root.join("VERSION")
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load a typed registry document.
///
/// Returns `RegistryError::DocumentNotFound` if absent,
/// `RegistryError::Parse` (with path context) if malformed JSON.
pub fn load_document(path: &Path) -> Result<RegistryDocument, RegistryError> {
    let contents = read_existing(path)?;
    serde_json::from_str(&contents).map_err(|e| RegistryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a document as raw JSON for schema-level validation.
///
/// Validation needs to see absent fields and wrong types, which a typed
/// deserialize would reject up front.
pub fn load_value(path: &Path) -> Result<Value, RegistryError> {
    let contents = read_existing(path)?;
    serde_json::from_str(&contents).map_err(|e| RegistryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_existing(path: &Path) -> Result<String, RegistryError> {
    if !path.exists() {
        return Err(RegistryError::DocumentNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Contents of `<root>/VERSION`, trimmed; `"1.0.0"` when absent.
pub fn read_version(root: &Path) -> String {
    match std::fs::read_to_string(version_path(root)) {
        Ok(contents) => contents.trim().to_string(),
        Err(_) => DEFAULT_VERSION.to_string(),
    }
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a registry document as pretty-printed JSON.
///
/// Write flow: serialize → `.tmp` sibling → `rename`. The `.tmp` is always
/// in the same directory as the target (same filesystem, so the rename is
/// atomic on POSIX).
pub fn save_document(path: &Path, doc: &RegistryDocument) -> Result<(), RegistryError> {
    let json = serde_json::to_string_pretty(doc)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, json)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AerodromeRecord, Icao};
    use tempfile::TempDir;

    fn doc() -> RegistryDocument {
        RegistryDocument::new(
            "1.0.0".to_string(),
            "2024-01-01T00:00:00+00:00".to_string(),
            vec![AerodromeRecord {
                icao: Icao::from("KJFK"),
                name: "John F Kennedy".to_string(),
                country: "US".to_string(),
                timezone: "America/New_York".to_string(),
            }],
        )
    }

    #[test]
    fn well_known_paths() {
        let root = Path::new("/data/registry");
        assert!(staging_path(root).ends_with("aerodromes-staging.json"));
        assert!(production_path(root).ends_with("aerodromes.json"));
        assert!(backups_dir(root).ends_with("backups"));
        assert!(overrides_dir(root).ends_with("modifications/overrides"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let root = TempDir::new().expect("tempdir");
        let path = staging_path(root.path());
        save_document(&path, &doc()).expect("save");
        let loaded = load_document(&path).expect("load");
        assert_eq!(loaded, doc());
    }

    #[test]
    fn atomic_save_cleans_up_tmp() {
        let root = TempDir::new().expect("tempdir");
        let path = staging_path(root.path());
        save_document(&path, &doc()).expect("save");
        let tmp = PathBuf::from(format!("{}.tmp", path.display()));
        assert!(!tmp.exists(), ".tmp must be gone after successful save");
    }

    #[test]
    fn load_missing_document_returns_not_found() {
        let root = TempDir::new().expect("tempdir");
        let err = load_document(&staging_path(root.path())).unwrap_err();
        assert!(matches!(err, RegistryError::DocumentNotFound { .. }));
    }

    #[test]
    fn load_malformed_document_returns_parse_error() {
        let root = TempDir::new().expect("tempdir");
        let path = staging_path(root.path());
        std::fs::write(&path, "{not json").expect("write");
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, RegistryError::Parse { .. }));
    }

    #[test]
    fn read_version_defaults_when_absent() {
        let root = TempDir::new().expect("tempdir");
        assert_eq!(read_version(root.path()), "1.0.0");
    }

    #[test]
    fn read_version_trims_file_contents() {
        let root = TempDir::new().expect("tempdir");
        std::fs::write(version_path(root.path()), "2.4.0\n").expect("write");
        assert_eq!(read_version(root.path()), "2.4.0");
    }
}
