//! Blocking HTTP retrieval of the two source feeds.
//!
//! Data sources:
//! - OurAirports (public domain) — airport master data.
//! - OpenFlights (ODbL) — timezone data.

use crate::error::SyncError;

/// OurAirports airport CSV export.
pub const PRIMARY_URL: &str =
    "https://davidmegginson.github.io/ourairports-data/airports.csv";

/// OpenFlights airports.dat export.
pub const SECONDARY_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data/airports.dat";

/// Raw text of both feeds, as fetched.
#[derive(Debug, Clone)]
pub struct SourceData {
    pub primary_csv: String,
    pub secondary_dat: String,
}

/// Download one feed as UTF-8 text.
pub fn download(url: &str) -> Result<String, SyncError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| SyncError::SourceUnavailable {
            url: url.to_string(),
            source: Box::new(e),
        })?;
    response.into_string().map_err(|e| SyncError::BodyRead {
        url: url.to_string(),
        source: e,
    })
}

/// Fetch both source feeds. Either failure is fatal.
pub fn fetch_sources() -> Result<SourceData, SyncError> {
    tracing::info!("downloading primary feed: {PRIMARY_URL}");
    let primary_csv = download(PRIMARY_URL)?;
    tracing::info!("downloading secondary feed: {SECONDARY_URL}");
    let secondary_dat = download(SECONDARY_URL)?;
    Ok(SourceData {
        primary_csv,
        secondary_dat,
    })
}
