//! Data layer — typed CSV loading and the read-through cache.

pub mod cache;
pub mod load;

pub use cache::DataCache;
pub use load::{load_combined, load_demand, load_stations, DataError};

use serde::{Deserialize, Serialize};

/// Aggregation timeframe of the demand/station source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Timeframe::Daily => Timeframe::Weekly,
            Timeframe::Weekly => Timeframe::Monthly,
            Timeframe::Monthly => Timeframe::Daily,
        }
    }
}
