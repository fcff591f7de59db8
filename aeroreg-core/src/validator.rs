//! Structural and referential checks for a registry document.
//!
//! The validator works on raw JSON so it can report absent fields and wrong
//! types instead of failing at deserialization. It collects every applicable
//! issue rather than short-circuiting, and never mutates the document.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use thiserror::Error;

/// Required top-level document fields, in reporting order.
const DOCUMENT_FIELDS: [&str; 4] = ["version", "last_updated", "total_count", "aerodromes"];

/// Required per-record fields, in reporting order.
const RECORD_FIELDS: [&str; 4] = ["icao", "name", "country", "timezone"];

/// How thoroughly record fields are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Sample the first record only — cheap pre-flight check.
    Lightweight,
    /// Check every record — gates production promotion.
    Strict,
}

/// A single failed validation check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("aerodromes must be an array")]
    AerodromesNotArray,

    #[error("total_count must be a non-negative integer")]
    CountNotNumeric,

    #[error("count mismatch: total_count={declared}, actual={actual}")]
    CountMismatch { declared: u64, actual: usize },

    #[error("aerodrome [{index}] missing field: {field}")]
    MissingRecordField { index: usize, field: &'static str },

    #[error("duplicate ICAO code: {icao}")]
    DuplicateIcao { icao: String },
}

/// Validate a registry document.
///
/// Returns `Ok(())` when every check passes, otherwise all collected issues.
pub fn validate(doc: &Value, mode: ValidationMode) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    for field in DOCUMENT_FIELDS {
        if doc.get(field).is_none() {
            issues.push(ValidationIssue::MissingField { field });
        }
    }

    // A present-but-mistyped count must fail, not silently skip the
    // comparison.
    let declared_count = match doc.get("total_count") {
        Some(count) => {
            let declared = count.as_u64();
            if declared.is_none() {
                issues.push(ValidationIssue::CountNotNumeric);
            }
            declared
        }
        None => None,
    };

    let records = match doc.get("aerodromes") {
        Some(Value::Array(records)) => Some(records),
        Some(_) => {
            issues.push(ValidationIssue::AerodromesNotArray);
            None
        }
        None => None,
    };

    if let Some(records) = records {
        if let Some(declared) = declared_count {
            if declared as usize != records.len() {
                issues.push(ValidationIssue::CountMismatch {
                    declared,
                    actual: records.len(),
                });
            }
        }

        let checked: &[Value] = match mode {
            ValidationMode::Lightweight => &records[..records.len().min(1)],
            ValidationMode::Strict => &records[..],
        };
        for (index, record) in checked.iter().enumerate() {
            for field in RECORD_FIELDS {
                if record.get(field).is_none() {
                    issues.push(ValidationIssue::MissingRecordField { index, field });
                }
            }
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for record in records {
            if let Some(icao) = record.get("icao").and_then(Value::as_str) {
                if !seen.insert(icao) && reported.insert(icao) {
                    issues.push(ValidationIssue::DuplicateIcao {
                        icao: icao.to_string(),
                    });
                }
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// One-line summary of a failed validation, for log and CLI output.
pub struct IssueList<'a>(pub &'a [ValidationIssue]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
