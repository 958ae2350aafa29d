//! Naive baseline: tomorrow's demand equals today's actual demand.

use crate::reconcile::ReconciledSeries;

/// One-step-lag forecast, index-aligned with the series.
///
/// `forecast[i] = actual[i - 1]`; the first entry has no predecessor and is
/// NaN (treated as missing by the evaluator's display path).
pub fn lag_baseline(series: &ReconciledSeries) -> Vec<f64> {
    let actuals = series.actuals();
    let mut forecast = Vec::with_capacity(actuals.len());
    if !actuals.is_empty() {
        forecast.push(f64::NAN);
        forecast.extend_from_slice(&actuals[..actuals.len() - 1]);
    }
    forecast
}
