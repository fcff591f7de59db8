//! Operator override loading.
//!
//! Overrides live as JSON array files under `modifications/overrides/`.
//! Malformed files and malformed elements are skipped with a diagnostic —
//! one bad patch file must never block a sync.

use std::path::Path;

use serde_json::Value;

use aeroreg_core::{store, OverrideRecord};

use crate::error::{io_err, SyncError};

/// Load every override record under `<root>/modifications/overrides/`.
///
/// Files are processed in name order for deterministic results. An absent
/// directory simply yields no overrides.
pub fn load(root: &Path) -> Result<Vec<OverrideRecord>, SyncError> {
    let dir = store::overrides_dir(root);
    if !dir.exists() {
        tracing::info!("no overrides directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut files: Vec<_> = std::fs::read_dir(&dir)
        .map_err(|e| io_err(&dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut overrides = Vec::new();
    for path in files {
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Array(elements)) => {
                let before = overrides.len();
                for element in elements {
                    match serde_json::from_value::<OverrideRecord>(element) {
                        Ok(record) => overrides.push(record),
                        Err(e) => {
                            tracing::warn!(
                                "skipping override entry in {}: {e}",
                                path.display()
                            );
                        }
                    }
                }
                tracing::info!(
                    "loaded {} overrides from {}",
                    overrides.len() - before,
                    path.display()
                );
            }
            Ok(_) => {
                tracing::warn!("skipping {}: expected JSON array", path.display());
            }
            Err(e) => {
                tracing::warn!("skipping {}: {e}", path.display());
            }
        }
    }
    Ok(overrides)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
