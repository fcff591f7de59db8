//! Domain types for the aerodrome registry.
//!
//! The published shape of a registry document is JSON; every struct here
//! round-trips through serde_json unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A 4-character ICAO aerodrome code — the registry's primary key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icao(pub String);

impl fmt::Display for Icao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Icao {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Icao {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single published aerodrome record.
///
/// `timezone` is never empty in a finalized record — reconciliation falls
/// back to `"UTC"` when no source yields one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AerodromeRecord {
    pub icao: Icao,
    pub name: String,
    pub country: String,
    pub timezone: String,
}

/// The unit of publication: a versioned, counted, sorted record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub version: String,
    pub last_updated: String,
    /// Set only by the release controller at promotion time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,
    pub total_count: usize,
    pub aerodromes: Vec<AerodromeRecord>,
}

impl RegistryDocument {
    /// Build a staging document. `total_count` is derived from the record
    /// set; `released_at` is always `None` here.
    pub fn new(version: String, last_updated: String, aerodromes: Vec<AerodromeRecord>) -> Self {
        Self {
            version,
            last_updated,
            released_at: None,
            total_count: aerodromes.len(),
            aerodromes,
        }
    }
}

/// An operator-authored patch, keyed by `icao`.
///
/// Supplied fields take precedence over source-derived data; `icao` is the
/// only field that is never defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    pub icao: Icao,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(icao: &str) -> AerodromeRecord {
        AerodromeRecord {
            icao: Icao::from(icao),
            name: "Test Field".to_string(),
            country: "US".to_string(),
            timezone: "UTC".to_string(),
        }
    }

    #[test]
    fn icao_display_and_equality() {
        assert_eq!(Icao::from("KJFK").to_string(), "KJFK");
        assert_eq!(Icao::from("EGLL"), Icao::from(String::from("EGLL")));
    }

    #[test]
    fn icao_serializes_transparently() {
        let json = serde_json::to_string(&Icao::from("KJFK")).expect("serialize");
        assert_eq!(json, "\"KJFK\"");
    }

    #[test]
    fn new_document_derives_total_count() {
        let doc = RegistryDocument::new(
            "1.0.0".to_string(),
            "2024-01-01T00:00:00+00:00".to_string(),
            vec![record("KJFK"), record("KLAX")],
        );
        assert_eq!(doc.total_count, 2);
        assert!(doc.released_at.is_none());
    }

    #[test]
    fn released_at_absent_from_staging_json() {
        let doc = RegistryDocument::new(
            "1.0.0".to_string(),
            "2024-01-01T00:00:00+00:00".to_string(),
            vec![],
        );
        let json = serde_json::to_string(&doc).expect("serialize");
        assert!(!json.contains("released_at"));
    }

    #[test]
    fn document_serde_roundtrip() {
        let mut doc = RegistryDocument::new(
            "2.3.1".to_string(),
            "2024-06-01T12:00:00+02:00".to_string(),
            vec![record("EGLL")],
        );
        doc.released_at = Some("2024-06-02T09:00:00+02:00".to_string());
        let json = serde_json::to_string_pretty(&doc).expect("serialize");
        let back: RegistryDocument = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, doc);
    }

    #[test]
    fn override_omitted_fields_stay_absent() {
        let json = r#"{"icao": "KJFK", "timezone": "America/Chicago"}"#;
        let o: OverrideRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(o.icao, Icao::from("KJFK"));
        assert!(o.name.is_none());
        assert!(o.country.is_none());
        assert_eq!(o.timezone.as_deref(), Some("America/Chicago"));
    }
}
