//! Forecast accuracy metrics — pure functions over aligned value slices.
//!
//! Every metric is a pure function: actual and forecast slices in, scalar out.
//! No dependencies on the data layer or the evaluator.

/// MAPE outcome: the percentage plus how many zero-actual points were excluded.
///
/// Zero-actual policy: a point whose actual value is 0 has an undefined
/// percentage error and is excluded from the mean rather than producing a
/// non-finite result. When every point is excluded, `percent` is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mape {
    pub percent: Option<f64>,
    pub excluded_zeros: usize,
}

/// Mean absolute percentage error, as a percentage (ratio * 100).
///
/// Panics in debug builds if the slices disagree in length; callers validate
/// alignment before metric computation.
pub fn mape(actual: &[f64], forecast: &[f64]) -> Mape {
    debug_assert_eq!(actual.len(), forecast.len());

    let mut sum = 0.0;
    let mut used = 0usize;
    let mut excluded = 0usize;
    for (&a, &f) in actual.iter().zip(forecast) {
        if a == 0.0 {
            excluded += 1;
            continue;
        }
        sum += ((a - f) / a).abs();
        used += 1;
    }

    Mape {
        percent: (used > 0).then(|| sum / used as f64 * 100.0),
        excluded_zeros: excluded,
    }
}

/// Root mean squared error. Returns 0.0 on empty input.
pub fn rmse(actual: &[f64], forecast: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), forecast.len());
    if actual.is_empty() {
        return 0.0;
    }
    let mse = actual
        .iter()
        .zip(forecast)
        .map(|(a, f)| (a - f) * (a - f))
        .sum::<f64>()
        / actual.len() as f64;
    mse.sqrt()
}

/// Round to 2 decimal places, the display precision for both metrics.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mape_matches_hand_computation() {
        // Lag-1 baseline over [10, 20, 30, 40]: errors 10/20, 10/30, 10/40.
        let actual = [20.0, 30.0, 40.0];
        let forecast = [10.0, 20.0, 30.0];
        let m = mape(&actual, &forecast);
        let expected = (0.5 + 10.0 / 30.0 + 0.25) / 3.0 * 100.0;
        assert!((m.percent.unwrap() - expected).abs() < 1e-9);
        assert_eq!(m.excluded_zeros, 0);
        assert_eq!(round2(m.percent.unwrap()), 36.11);
    }

    #[test]
    fn rmse_matches_hand_computation() {
        let actual = [20.0, 30.0, 40.0];
        let forecast = [10.0, 20.0, 30.0];
        assert!((rmse(&actual, &forecast) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_actuals_are_excluded_not_nan() {
        let actual = [0.0, 20.0];
        let forecast = [5.0, 10.0];
        let m = mape(&actual, &forecast);
        assert_eq!(m.excluded_zeros, 1);
        assert!((m.percent.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_actuals_yield_none() {
        let m = mape(&[0.0, 0.0], &[1.0, 2.0]);
        assert_eq!(m.percent, None);
        assert_eq!(m.excluded_zeros, 2);
    }

    #[test]
    fn rmse_of_perfect_forecast_is_zero() {
        assert_eq!(rmse(&[3.0, 4.0], &[3.0, 4.0]), 0.0);
    }

    #[test]
    fn round2_to_display_precision() {
        assert_eq!(round2(36.111), 36.11);
        assert_eq!(round2(36.119), 36.12);
    }
}
