//! # aeroreg-sync
//!
//! Source fetch, normalization, and reconciliation for the aerodrome
//! registry.
//!
//! Call [`pipeline::run`] with pre-fetched [`SourceData`] to rebuild the
//! staging artifact, or [`fetch::fetch_sources`] first to pull both feeds
//! over HTTP.

pub mod error;
pub mod fallback;
pub mod fetch;
pub mod normalize;
pub mod overrides;
pub mod pipeline;
pub mod reconcile;

pub use error::SyncError;
pub use fetch::SourceData;
pub use pipeline::SyncReport;
pub use reconcile::MergeStats;
