//! Forecast producers — the naive lag baseline and the serialized
//! gradient-boosted model.
//!
//! Both produce a forecast column index-aligned with a reconciled series; the
//! evaluator treats them identically.

pub mod baseline;
pub mod features;
pub mod model;

pub use baseline::lag_baseline;
pub use features::{build_features, FeatureMatrix};
pub use model::{GbmModel, ModelError};

use serde::{Deserialize, Serialize};

/// Which forecast the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelChoice {
    Baseline,
    GradientBoosted,
}

impl ModelChoice {
    pub fn label(self) -> &'static str {
        match self {
            ModelChoice::Baseline => "Naive baseline",
            ModelChoice::GradientBoosted => "Gradient-boosted model",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ModelChoice::Baseline => ModelChoice::GradientBoosted,
            ModelChoice::GradientBoosted => ModelChoice::Baseline,
        }
    }
}
