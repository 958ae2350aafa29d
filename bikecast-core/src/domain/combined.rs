//! Combined weather + demand — the date-indexed series the forecasts run on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of `combined_data.csv` as it arrives from disk.
///
/// Numeric fields are optional because the source keeps rows whose weather
/// observations are missing; those rows still carry dates and must survive
/// until after reconciliation (the cleanup pass runs on the reconciled series,
/// not on the raw file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCombinedRecord {
    pub date: NaiveDate,
    pub total_demand: Option<f64>,
    pub temp_obs: Option<f64>,
    pub prcp: Option<f64>,
}

impl RawCombinedRecord {
    /// A row is complete when every value column is present and finite.
    pub fn complete(&self) -> Option<CombinedRecord> {
        match (self.total_demand, self.temp_obs, self.prcp) {
            (Some(demand), Some(temp), Some(prcp))
                if demand.is_finite() && temp.is_finite() && prcp.is_finite() =>
            {
                Some(CombinedRecord {
                    date: self.date,
                    total_demand: demand,
                    temp_obs: temp,
                    prcp,
                })
            }
            _ => None,
        }
    }
}

/// A fully-populated daily observation: demand plus weather.
///
/// `temp_obs` is observed temperature in tenths of °C; `prcp` is precipitation
/// in tenths of mm (both as published in the source data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub date: NaiveDate,
    pub total_demand: f64,
    pub temp_obs: f64,
    pub prcp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(demand: Option<f64>) -> RawCombinedRecord {
        RawCombinedRecord {
            date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
            total_demand: demand,
            temp_obs: Some(215.0),
            prcp: Some(0.0),
        }
    }

    #[test]
    fn complete_row_converts() {
        let rec = raw(Some(12_000.0)).complete().unwrap();
        assert_eq!(rec.total_demand, 12_000.0);
    }

    #[test]
    fn missing_demand_is_incomplete() {
        assert!(raw(None).complete().is_none());
    }

    #[test]
    fn nan_demand_is_incomplete() {
        assert!(raw(Some(f64::NAN)).complete().is_none());
    }
}
