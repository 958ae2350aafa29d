//! Integration tests for the full forecast-evaluation pipeline:
//! raw rows → reconcile → forecast column → evaluate → window + metric pair.

use chrono::{Duration, NaiveDate};

use bikecast_core::domain::RawCombinedRecord;
use bikecast_core::evaluate::{evaluate, EvalWarning};
use bikecast_core::forecast::{lag_baseline, GbmModel};
use bikecast_core::reconcile::{reconcile, ReconciledSeries};

fn row(date: NaiveDate, demand: f64) -> RawCombinedRecord {
    RawCombinedRecord {
        date,
        total_demand: Some(demand),
        temp_obs: Some(180.0),
        prcp: Some(2.0),
    }
}

/// Gapped input: training rows end 2019-12-31, test rows start 2022-01-01.
fn series_with(train_demands: &[f64], test_demands: &[f64]) -> ReconciledSeries {
    let train_end = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
    let test_start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let mut rows = Vec::new();
    for (i, &d) in train_demands.iter().enumerate() {
        let back = (train_demands.len() - 1 - i) as i64;
        rows.push(row(train_end - Duration::days(back), d));
    }
    for (i, &d) in test_demands.iter().enumerate() {
        rows.push(row(test_start + Duration::days(i as i64), d));
    }
    reconcile(&rows, 2020, 2021).unwrap()
}

#[test]
fn seven_day_window_has_twelve_rows() {
    let series = series_with(&[1.0; 20], &[2.0; 20]);
    let forecast = lag_baseline(&series);
    let eval = evaluate(&series, 7, &forecast).unwrap();

    assert_eq!(eval.window.len(), 12);
    assert_eq!(eval.lookback_rows().len(), 5);
    assert_eq!(eval.forecast_rows().len(), 7);
    assert!(eval.warnings.is_empty());
}

#[test]
fn lag_baseline_metrics_match_hand_computation() {
    // Actuals [10, 20, 30, 40], one training row, horizon 3.
    // Lag forecast over the evaluated points: [10, 20, 30] vs [20, 30, 40].
    // MAPE = mean(10/20, 10/30, 10/40) * 100 = 36.11 (2 dp)
    // RMSE = sqrt(mean(100, 100, 100)) = 10.0
    let series = series_with(&[10.0], &[20.0, 30.0, 40.0]);
    let forecast = lag_baseline(&series);
    let eval = evaluate(&series, 3, &forecast).unwrap();

    assert_eq!(eval.mape_percent, Some(36.11));
    assert_eq!(eval.rmse, 10.0);
    assert_eq!(eval.horizon_used, 3);
}

#[test]
fn partial_horizon_evaluates_what_exists() {
    let series = series_with(&[1.0; 10], &[2.0; 60]);
    let forecast = lag_baseline(&series);
    let eval = evaluate(&series, 90, &forecast).unwrap();

    assert_eq!(eval.window.len(), 5 + 60);
    assert_eq!(eval.horizon_used, 60);
    assert!(eval.warnings.contains(&EvalWarning::PartialHorizon {
        requested: 90,
        available: 60
    }));
}

#[test]
fn zero_actual_follows_the_exclusion_policy() {
    // One zero-demand day inside the horizon: excluded from MAPE, flagged,
    // still counted by RMSE.
    let series = series_with(&[10.0; 6], &[20.0, 0.0, 40.0]);
    let forecast = lag_baseline(&series);
    let eval = evaluate(&series, 3, &forecast).unwrap();

    assert!(eval
        .warnings
        .contains(&EvalWarning::ZeroActuals { excluded: 1 }));
    let mape = eval.mape_percent.unwrap();
    assert!(mape.is_finite());
    // Evaluated pairs: (20, 10), (0, 20) excluded, (40, 0).
    let expected: f64 = (10.0 / 20.0 + 40.0 / 40.0) / 2.0 * 100.0;
    assert_eq!(mape, (expected * 100.0).round() / 100.0);
}

#[test]
fn boundary_marker_sits_between_lookback_and_forecast() {
    let series = series_with(&[1.0; 10], &[2.0; 10]);
    let forecast = lag_baseline(&series);
    let eval = evaluate(&series, 7, &forecast).unwrap();

    let boundary = eval.boundary_date.unwrap();
    assert_eq!(boundary, NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
    assert_eq!(
        eval.forecast_rows()[0].date,
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    );
}

#[test]
fn gbm_forecast_feeds_the_same_evaluator() {
    // A constant model: base score only, no trees.
    let artifact = r#"{ "base_score": 30.0, "n_features": 10, "trees": [] }"#;
    let model = GbmModel::from_slice(artifact.as_bytes()).unwrap();

    let series = series_with(&[10.0; 6], &[30.0, 30.0, 30.0]);
    let forecast = model.forecast_series(&series).unwrap();
    assert_eq!(forecast.len(), series.len());

    let eval = evaluate(&series, 3, &forecast).unwrap();
    assert_eq!(eval.mape_percent, Some(0.0));
    assert_eq!(eval.rmse, 0.0);
}
