//! Error types for aeroreg-sync.

use std::path::PathBuf;

use thiserror::Error;

use aeroreg_core::error::RegistryError;
use aeroreg_core::ValidationIssue;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A source feed could not be fetched. Fatal; no retry is built in.
    #[error("source unavailable: {url}: {source}")]
    SourceUnavailable {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The fetched response body could not be read as UTF-8 text.
    #[error("failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// An error from the artifact store.
    #[error("store error: {0}")]
    Store(#[from] RegistryError),

    /// The freshly written staging artifact failed its sanity check.
    #[error("staging artifact failed sanity check with {} issue(s)", .0.len())]
    StagingInvalid(Vec<ValidationIssue>),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
