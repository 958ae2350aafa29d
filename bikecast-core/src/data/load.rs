//! CSV loading into typed records.
//!
//! Each dataset variant has its own schema; unknown columns are ignored,
//! unparseable rows are hard failures surfaced before any core computation
//! runs. Rows with missing values are dropped here for the station and demand
//! datasets; the combined dataset keeps them (its cleanup runs after
//! reconciliation).

use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DemandRecord, RawCombinedRecord, StationRecord};

/// Structured errors for the loading layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed data in '{path}': {detail}")]
    Malformed { path: String, detail: String },

    #[error("'{path}' contains no usable rows")]
    Empty { path: String },
}

/// Station rows as they appear on disk: every field optional so rows with
/// holes can be dropped instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct StationRow {
    start_station_id: Option<u32>,
    start_station_name: Option<String>,
    lon: Option<f64>,
    lat: Option<f64>,
    bike_counts: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DemandRow {
    date: Option<NaiveDate>,
    bike_counts: Option<f64>,
}

/// Load `{timeframe}_avg_by_station.csv`.
pub fn load_stations(path: &Path) -> Result<Vec<StationRecord>, DataError> {
    let bytes = read(path)?;
    parse_stations(&bytes, path)
}

pub(crate) fn parse_stations(bytes: &[u8], path: &Path) -> Result<Vec<StationRecord>, DataError> {
    let rows: Vec<StationRow> = parse_csv(bytes, path)?;
    let records: Vec<StationRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let record = StationRecord {
                start_station_id: row.start_station_id?,
                start_station_name: row.start_station_name?,
                lon: row.lon?,
                lat: row.lat?,
                bike_counts: row.bike_counts?,
            };
            record.is_complete().then_some(record)
        })
        .collect();
    non_empty(records, path)
}

/// Load `{timeframe}.csv` (period totals over time).
pub fn load_demand(path: &Path) -> Result<Vec<DemandRecord>, DataError> {
    let bytes = read(path)?;
    parse_demand(&bytes, path)
}

pub(crate) fn parse_demand(bytes: &[u8], path: &Path) -> Result<Vec<DemandRecord>, DataError> {
    let rows: Vec<DemandRow> = parse_csv(bytes, path)?;
    let records: Vec<DemandRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let record = DemandRecord {
                date: row.date?,
                bike_counts: row.bike_counts?,
            };
            record.is_complete().then_some(record)
        })
        .collect();
    non_empty(records, path)
}

/// Load `combined_data.csv` (date-indexed demand + weather).
///
/// Rows without a date are unusable and fail the load; rows with missing
/// value columns are kept for the post-reconciliation cleanup pass.
pub fn load_combined(path: &Path) -> Result<Vec<RawCombinedRecord>, DataError> {
    let bytes = read(path)?;
    parse_combined(&bytes, path)
}

pub(crate) fn parse_combined(bytes: &[u8], path: &Path) -> Result<Vec<RawCombinedRecord>, DataError> {
    let records: Vec<RawCombinedRecord> = parse_csv(bytes, path)?;
    non_empty(records, path)
}

fn read(path: &Path) -> Result<Vec<u8>, DataError> {
    std::fs::read(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_csv<T: DeserializeOwned>(bytes: &[u8], path: &Path) -> Result<Vec<T>, DataError> {
    csv::Reader::from_reader(bytes)
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| DataError::Malformed {
            path: path.display().to_string(),
            detail: e.to_string(),
        })
}

fn non_empty<T>(records: Vec<T>, path: &Path) -> Result<Vec<T>, DataError> {
    if records.is_empty() {
        return Err(DataError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(records)
}
