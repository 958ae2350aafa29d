//! Bikecast Core — demand/weather dataset schemas, reconciliation, forecasting,
//! and forecast evaluation.
//!
//! This crate contains everything below the presentation layer:
//! - Typed records per dataset variant (stations, demand, combined)
//! - CSV loading with a read-through cache
//! - Train/test date-index reconciliation (the gap-restitching transformation)
//! - Forecast producers (lag baseline, serialized gradient-boosted model)
//! - Evaluation windows and the MAPE/RMSE metric pair
//! - Aggregation queries behind the visualization panels

pub mod aggregate;
pub mod config;
pub mod data;
pub mod domain;
pub mod evaluate;
pub mod forecast;
pub mod metrics;
pub mod reconcile;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI worker thread moves across its
    /// channels is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::StationRecord>();
        require_sync::<domain::StationRecord>();
        require_send::<domain::DemandRecord>();
        require_sync::<domain::DemandRecord>();
        require_send::<domain::CombinedRecord>();
        require_sync::<domain::CombinedRecord>();

        require_send::<reconcile::ReconciledSeries>();
        require_sync::<reconcile::ReconciledSeries>();
        require_send::<evaluate::Evaluation>();
        require_sync::<evaluate::Evaluation>();
        require_send::<forecast::GbmModel>();
        require_sync::<forecast::GbmModel>();
        require_send::<data::DataCache>();
        require_send::<config::BikecastConfig>();
        require_sync::<config::BikecastConfig>();
    }
}
