//! Station — per-station average rental record.

use serde::{Deserialize, Serialize};

use super::StationId;

/// Average bike rentals at one station over a timeframe (daily/weekly/monthly).
///
/// One row of `{daily,weekly,monthly}_avg_by_station.csv`. The `lon`/`lat`
/// coordinates feed the map-style visualization, `bike_counts` drives both the
/// column elevation and the best/worst rankings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub start_station_id: StationId,
    pub start_station_name: String,
    pub lon: f64,
    pub lat: f64,
    pub bike_counts: f64,
}

impl StationRecord {
    /// Returns true if any numeric field is missing (NaN) or the coordinates
    /// are outside valid ranges.
    pub fn is_complete(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && self.bike_counts.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}
