//! Domain types for bikecast — one typed record per dataset variant.

pub mod combined;
pub mod demand;
pub mod station;

pub use combined::{CombinedRecord, RawCombinedRecord};
pub use demand::DemandRecord;
pub use station::StationRecord;

/// Bike-share station identifier as it appears in the source data.
pub type StationId = u32;
