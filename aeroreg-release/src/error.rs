//! Error types for aeroreg-release.

use std::path::PathBuf;

use thiserror::Error;

use aeroreg_core::{RegistryError, ValidationIssue};

/// All errors that can arise while promoting staging to production.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The staging artifact did not exist.
    #[error("staging artifact not found at {0}; run sync first")]
    SourceMissing(PathBuf),

    /// Strict validation rejected the staging document; production untouched.
    #[error("staging validation failed with {} issue(s)", .0.len())]
    ValidationFailed(Vec<ValidationIssue>),

    /// The operator declined confirmation; nothing was mutated.
    #[error("release cancelled by operator")]
    Cancelled,

    /// The staging document could not be loaded or parsed.
    #[error("store error: {0}")]
    Store(#[from] RegistryError),

    /// I/O failure mid-promotion. Any backup created beforehand survives
    /// for manual recovery.
    #[error("release failed at {path}: {source}")]
    ReleaseFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All errors that can arise while rolling production back to a backup.
#[derive(Debug, Error)]
pub enum RollbackError {
    /// The backup directory is absent or holds no backup files.
    #[error("no backup files found")]
    NoBackupsFound,

    /// The selection index was outside the candidate range.
    #[error("invalid backup selection: {0}")]
    InvalidSelection(usize),

    /// The operator declined confirmation; production untouched.
    #[error("rollback cancelled by operator")]
    Cancelled,

    /// I/O failure while listing or restoring backups.
    #[error("rollback failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ReleaseError::ReleaseFailed`].
pub(crate) fn release_err(path: impl Into<PathBuf>, source: std::io::Error) -> ReleaseError {
    ReleaseError::ReleaseFailed {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`RollbackError::Io`].
pub(crate) fn rollback_err(path: impl Into<PathBuf>, source: std::io::Error) -> RollbackError {
    RollbackError::Io {
        path: path.into(),
        source,
    }
}
