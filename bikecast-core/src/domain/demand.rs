//! Demand — aggregate rental counts over time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Total bike rentals for one period (a day, week, or month depending on the
/// source file).
///
/// One row of `{daily,weekly,monthly}.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRecord {
    pub date: NaiveDate,
    pub bike_counts: f64,
}

impl DemandRecord {
    pub fn is_complete(&self) -> bool {
        self.bike_counts.is_finite()
    }
}
