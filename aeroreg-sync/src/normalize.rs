//! Source record normalizers.
//!
//! Converts raw feed rows/lines into typed intermediates, rejecting what
//! cannot be keyed. Rejection here is routine (most OurAirports rows have
//! no ICAO code), not an error.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use aeroreg_core::Icao;

/// Timezone values some exports use to mean "no data".
const MISSING_TIMEZONE_VALUES: [&str; 4] = ["", "N", "NULL", "\\N"];

/// Zero-based field positions in the secondary feed.
const SECONDARY_ICAO_FIELD: usize = 5;
const SECONDARY_TIMEZONE_FIELD: usize = 11;

/// Facts about one airport from the primary feed.
///
/// `latitude`/`longitude` are reconciliation-internal and never published;
/// unparsable coordinates deliberately collapse to `0.0` (lossy but
/// deterministic).
#[derive(Debug, Clone, PartialEq)]
pub struct AirportFacts {
    pub name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One raw row of the primary CSV, as named string fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAirportRow {
    #[serde(default)]
    pub icao_code: String,
    #[serde(default)]
    pub ident: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iso_country: String,
    #[serde(default)]
    pub latitude_deg: String,
    #[serde(default)]
    pub longitude_deg: String,
}

/// Derive the ICAO key for a primary row.
///
/// A 4-character `icao_code` field wins; otherwise a 4-character alphabetic
/// `ident`; otherwise the row is rejected.
pub fn extract_icao_code(row: &RawAirportRow) -> Option<Icao> {
    let icao_field = row.icao_code.trim();
    let ident_field = row.ident.trim();

    if icao_field.len() == 4 {
        Some(Icao::from(icao_field))
    } else if ident_field.len() == 4 && ident_field.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(Icao::from(ident_field))
    } else {
        None
    }
}

/// Normalize one primary row, or reject it.
///
/// Closed airports are rejected regardless of their ICAO code.
pub fn normalize_airport_row(row: &RawAirportRow) -> Option<(Icao, AirportFacts)> {
    if row.kind.trim() == "closed" {
        return None;
    }
    let icao = extract_icao_code(row)?;
    Some((
        icao,
        AirportFacts {
            name: row.name.trim().to_string(),
            country_code: row.iso_country.trim().to_string(),
            latitude: row.latitude_deg.trim().parse().unwrap_or(0.0),
            longitude: row.longitude_deg.trim().parse().unwrap_or(0.0),
        },
    ))
}

/// Parse the full primary CSV into airports keyed by ICAO code.
///
/// Rows that fail to deserialize are skipped with a diagnostic, never fatal.
pub fn primary_airports(data: &str) -> BTreeMap<Icao, AirportFacts> {
    let mut airports = BTreeMap::new();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data.as_bytes());

    for result in reader.deserialize::<RawAirportRow>() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("skipping malformed primary row: {e}");
                continue;
            }
        };
        if let Some((icao, facts)) = normalize_airport_row(&row) {
            airports.insert(icao, facts);
        }
    }
    airports
}

/// Normalize one secondary feed line into `(icao, timezone)`, or reject it.
///
/// The feed has no header contract beyond a skippable `Airport ID` line;
/// fields are positional and may be double-quoted.
pub fn normalize_timezone_line(line: &str) -> Option<(Icao, String)> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= SECONDARY_TIMEZONE_FIELD {
        return None;
    }

    let icao = fields[SECONDARY_ICAO_FIELD].trim_matches('"');
    let timezone = fields[SECONDARY_TIMEZONE_FIELD].trim_matches('"');

    if icao.len() == 4 && !MISSING_TIMEZONE_VALUES.contains(&timezone) {
        Some((Icao::from(icao), timezone.to_string()))
    } else {
        None
    }
}

/// Parse the full secondary feed into a timezone lookup keyed by ICAO code.
pub fn secondary_timezones(data: &str) -> HashMap<Icao, String> {
    let mut timezones = HashMap::new();
    for line in data.trim().lines() {
        if line.starts_with("Airport ID") {
            continue;
        }
        if let Some((icao, timezone)) = normalize_timezone_line(line) {
            timezones.insert(icao, timezone);
        }
    }
    timezones
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(icao_code: &str, ident: &str) -> RawAirportRow {
        RawAirportRow {
            icao_code: icao_code.to_string(),
            ident: ident.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_icao_code_field_wins() {
        let r = row("KJFK", "JFK");
        assert_eq!(extract_icao_code(&r), Some(Icao::from("KJFK")));
    }

    #[test]
    fn four_char_alphabetic_ident_accepted_as_fallback() {
        let r = row("", "EGLL");
        assert_eq!(extract_icao_code(&r), Some(Icao::from("EGLL")));
    }

    #[test]
    fn non_alphabetic_ident_rejected() {
        let r = row("", "K3J7");
        assert_eq!(extract_icao_code(&r), None);
    }

    #[test]
    fn short_fields_rejected() {
        let r = row("JFK", "LAX");
        assert_eq!(extract_icao_code(&r), None);
    }

    #[test]
    fn closed_airports_rejected() {
        let mut r = row("KOLD", "");
        r.kind = "closed".to_string();
        assert!(normalize_airport_row(&r).is_none());
    }

    #[test]
    fn unparsable_coordinates_default_to_zero() {
        let mut r = row("KJFK", "");
        r.name = "John F Kennedy".to_string();
        r.iso_country = "US".to_string();
        r.latitude_deg = "not-a-number".to_string();
        let (_, facts) = normalize_airport_row(&r).expect("normalized");
        assert_eq!(facts.latitude, 0.0);
        assert_eq!(facts.longitude, 0.0);
    }

    #[test]
    fn primary_csv_parses_by_header_name() {
        let data = "\
ident,type,name,latitude_deg,longitude_deg,iso_country,icao_code
KJFK,large_airport,John F Kennedy,40.64,-73.78,US,KJFK
JFK,closed,Old Field,0,0,US,KOLD
X1,small_airport,No Code,1.0,2.0,US,
";
        let airports = primary_airports(data);
        assert_eq!(airports.len(), 1);
        let facts = &airports[&Icao::from("KJFK")];
        assert_eq!(facts.name, "John F Kennedy");
        assert_eq!(facts.country_code, "US");
        assert!((facts.latitude - 40.64).abs() < 1e-9);
    }

    #[test]
    fn secondary_line_extracts_positional_fields() {
        let line = r#"3797,"John F Kennedy","New York","United States","JFK","KJFK",40.63,-73.77,13,-5,"A","America/New_York","airport","OurAirports""#;
        let (icao, tz) = normalize_timezone_line(line).expect("parsed");
        assert_eq!(icao, Icao::from("KJFK"));
        assert_eq!(tz, "America/New_York");
    }

    #[test]
    fn secondary_missing_timezone_sentinels_rejected() {
        for sentinel in ["\\N", "N", "NULL", ""] {
            let line = format!(
                r#"1,"X","Y","Z","ABC","KJFK",0,0,0,0,"A","{sentinel}","airport","src""#
            );
            assert!(
                normalize_timezone_line(&line).is_none(),
                "sentinel {sentinel:?} must be rejected"
            );
        }
    }

    #[test]
    fn secondary_non_four_char_icao_rejected() {
        let line = r#"1,"X","Y","Z","ABC","\N",0,0,0,0,"A","Europe/London","airport","src""#;
        assert!(normalize_timezone_line(&line).is_none());
    }

    #[test]
    fn secondary_header_and_short_lines_skipped() {
        let data = "\
Airport ID,Name,City,Country,IATA,ICAO,Lat,Lon,Alt,Tz,DST,TzName,Type,Source
short,line
1,\"H\",\"London\",\"UK\",\"LHR\",\"EGLL\",51.47,-0.46,83,0,\"E\",\"Europe/London\",\"airport\",\"src\"
";
        let timezones = secondary_timezones(data);
        assert_eq!(timezones.len(), 1);
        assert_eq!(timezones[&Icao::from("EGLL")], "Europe/London");
    }
}
