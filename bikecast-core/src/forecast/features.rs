//! Feature matrix for the gradient-boosted model.
//!
//! Mirrors the training-time layout: weather observations, day of week, and
//! demand lags 1..=7 filled with zero during warm-up.

use chrono::Datelike;

use crate::reconcile::ReconciledSeries;

/// Demand lags fed to the model.
pub const DEMAND_LAGS: usize = 7;

/// Row-major feature matrix, one row per series row.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the model's input matrix from a reconciled series.
///
/// Column order must match the artifact's training layout:
/// `temp_obs, prcp, day_of_week, total_demand_lag_1 .. total_demand_lag_7`.
/// Lags use 0.0 where no predecessor exists (the training pipeline's
/// `fill_value=0` convention), so warm-up rows still produce predictions.
pub fn build_features(series: &ReconciledSeries) -> FeatureMatrix {
    let mut names = vec![
        "temp_obs".to_string(),
        "prcp".to_string(),
        "day_of_week".to_string(),
    ];
    for lag in 1..=DEMAND_LAGS {
        names.push(format!("total_demand_lag_{lag}"));
    }

    let demands = series.actuals();
    let rows = series
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut features = Vec::with_capacity(names.len());
            features.push(row.temp_obs);
            features.push(row.prcp);
            features.push(row.date.weekday().num_days_from_monday() as f64);
            for lag in 1..=DEMAND_LAGS {
                features.push(if i >= lag { demands[i - lag] } else { 0.0 });
            }
            features
        })
        .collect();

    FeatureMatrix { names, rows }
}
