//! Crime incident CSV reader.
//!
//! # CSV format
//!
//! Any CSV with a header row and latitude/longitude columns.  Other columns
//! are ignored, so the cleaned city export can be fed in directly:
//!
//! ```csv
//! Date,Primary Type,Latitude,Longitude
//! 01/02/2024 10:15:00 PM,THEFT,41.8781,-87.6298
//! 01/02/2024 11:40:00 PM,BATTERY,,
//! ```
//!
//! Column names match case-insensitively (`Latitude`, `latitude`, …).
//! Rows with an empty coordinate are dropped; a non-numeric coordinate is a
//! parse error.  Category filtering happens upstream.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sr_core::GeoPoint;

use crate::{WeightError, WeightResult};

/// A single reported crime location.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CrimeIncident {
    pub pos: GeoPoint,
}

impl CrimeIncident {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { pos: GeoPoint::new(lat, lon) }
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

/// Headers are lower-cased before deserialization, so these names match
/// any capitalisation.
#[derive(Deserialize)]
struct CrimeRecord {
    latitude:  Option<f64>,
    longitude: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load crime incidents from a CSV file.
///
/// A missing file is an [`WeightError::Io`]; the offline build treats it as
/// fatal.
pub fn load_incidents_csv(path: &Path) -> WeightResult<Vec<CrimeIncident>> {
    let file = std::fs::File::open(path)?;
    load_incidents_reader(file)
}

/// Like [`load_incidents_csv`] but accepts any `Read` source.
pub fn load_incidents_reader<R: Read>(reader: R) -> WeightResult<Vec<CrimeIncident>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()
        .map_err(|e| WeightError::Parse(e.to_string()))?
        .iter()
        .map(str::to_ascii_lowercase)
        .collect();
    for column in ["latitude", "longitude"] {
        if !headers.iter().any(|h| h == column) {
            return Err(WeightError::MissingColumn(column));
        }
    }
    csv_reader.set_headers(headers);

    let mut incidents = Vec::new();
    for result in csv_reader.deserialize::<CrimeRecord>() {
        let row = result.map_err(|e| WeightError::Parse(e.to_string()))?;
        if let (Some(lat), Some(lon)) = (row.latitude, row.longitude) {
            incidents.push(CrimeIncident::new(lat, lon));
        }
    }
    Ok(incidents)
}
