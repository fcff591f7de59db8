//! Aeroreg core library — domain types, JSON store, validator, errors.
//!
//! Public API surface:
//! - [`types`] — [`Icao`] newtype and document structs
//! - [`error`] — [`RegistryError`]
//! - [`store`] — path helpers, atomic load/save
//! - [`validator`] — structural checks over a registry document

pub mod error;
pub mod store;
pub mod types;
pub mod validator;

pub use error::RegistryError;
pub use types::{AerodromeRecord, Icao, OverrideRecord, RegistryDocument};
pub use validator::{validate, ValidationIssue, ValidationMode};
