//! # aeroreg-release
//!
//! Staged release controller and diff reporter for the aerodrome registry.
//!
//! [`promote`] moves the staging artifact into the production slot behind
//! strict validation, confirmation, and a timestamped backup; [`rollback`]
//! restores a previous backup. [`diff`] compares two registry snapshots for
//! human review and never gates promotion.

pub mod controller;
pub mod diff;
pub mod error;

pub use controller::{
    list_backups, promote, rollback, rollback_candidates, Confirm, Released, MAX_ROLLBACK_CANDIDATES,
};
pub use diff::{diff, DiffReport, DiffThresholds, FieldChange, RecordChange};
pub use error::{ReleaseError, RollbackError};
