//! Aggregation queries behind the visualization panels.
//!
//! Pure functions: records in, display-ready rows out. Each user interaction
//! recomputes from the cached source data; nothing here holds state.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::{CombinedRecord, DemandRecord, StationRecord};

/// Ranking direction for the station leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankCriterion {
    Best,
    Worst,
}

impl RankCriterion {
    pub fn label(self) -> &'static str {
        match self {
            RankCriterion::Best => "best",
            RankCriterion::Worst => "worst",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            RankCriterion::Best => RankCriterion::Worst,
            RankCriterion::Worst => RankCriterion::Best,
        }
    }
}

/// Weather field selectable on the weather panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherField {
    TempObs,
    Prcp,
}

impl WeatherField {
    pub fn label(self) -> &'static str {
        match self {
            WeatherField::TempObs => "Observed Temperature",
            WeatherField::Prcp => "Rainfall",
        }
    }

    /// Unit string as published in the source data.
    pub fn unit(self) -> &'static str {
        match self {
            WeatherField::TempObs => "tenths of °C",
            WeatherField::Prcp => "tenths of mm",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            WeatherField::TempObs => WeatherField::Prcp,
            WeatherField::Prcp => WeatherField::TempObs,
        }
    }

    fn value(self, row: &CombinedRecord) -> f64 {
        match self {
            WeatherField::TempObs => row.temp_obs,
            WeatherField::Prcp => row.prcp,
        }
    }
}

/// Top/bottom `n` stations by average rentals.
///
/// Ties break on station name so the order is stable across recomputation.
/// `n` is clamped to the available rows.
pub fn rank_stations(
    stations: &[StationRecord],
    criterion: RankCriterion,
    n: usize,
) -> Vec<StationRecord> {
    let mut ranked: Vec<StationRecord> = stations.to_vec();
    ranked.sort_by(|a, b| {
        let by_counts = match criterion {
            RankCriterion::Best => b.bike_counts.total_cmp(&a.bike_counts),
            RankCriterion::Worst => a.bike_counts.total_cmp(&b.bike_counts),
        };
        by_counts.then_with(|| a.start_station_name.cmp(&b.start_station_name))
    });
    ranked.truncate(n);
    ranked
}

/// Mean of a weather field per calendar month (index 0 = January).
///
/// Months with no rows are `None` rather than 0, so a short series doesn't
/// chart phantom zero readings.
pub fn monthly_average(rows: &[CombinedRecord], field: WeatherField) -> [Option<f64>; 12] {
    let mut sums = [0.0f64; 12];
    let mut counts = [0usize; 12];
    for row in rows {
        let m = row.date.month0() as usize;
        sums[m] += field.value(row);
        counts[m] += 1;
    }
    std::array::from_fn(|m| (counts[m] > 0).then(|| sums[m] / counts[m] as f64))
}

/// Demand over time, sorted by date, ready for a line chart.
pub fn demand_curve(rows: &[DemandRecord]) -> Vec<(chrono::NaiveDate, f64)> {
    let mut curve: Vec<(chrono::NaiveDate, f64)> =
        rows.iter().map(|r| (r.date, r.bike_counts)).collect();
    curve.sort_by_key(|&(date, _)| date);
    curve
}
