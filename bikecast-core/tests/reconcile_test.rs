//! Integration and property tests for train/test reconciliation.
//!
//! Tests:
//! 1. Contiguity — reconciled dates are strictly increasing, one day apart
//! 2. Length preservation — train + test rows all survive (complete inputs)
//! 3. Boundary — the re-indexed test block starts the day after training ends
//! 4. Block classification — gap years appear in neither block

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use bikecast_core::domain::RawCombinedRecord;
use bikecast_core::reconcile::{reconcile, ReconciledSeries};

/// Helper: a complete row for a given date and demand.
fn row(date: NaiveDate, demand: f64) -> RawCombinedRecord {
    RawCombinedRecord {
        date,
        total_demand: Some(demand),
        temp_obs: Some(180.0),
        prcp: Some(2.0),
    }
}

/// Helper: gapped input with `train_len` daily rows ending in 2019 and
/// `test_len` daily rows starting 2022-01-01.
fn gapped_input(train_len: usize, test_len: usize) -> Vec<RawCombinedRecord> {
    let train_end = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
    let test_start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let mut rows = Vec::new();
    for i in (0..train_len).rev() {
        rows.push(row(train_end - Duration::days(i as i64), 100.0 + i as f64));
    }
    for i in 0..test_len {
        rows.push(row(test_start + Duration::days(i as i64), 500.0 + i as f64));
    }
    rows
}

fn assert_contiguous(series: &ReconciledSeries) {
    for pair in series.rows().windows(2) {
        assert_eq!(
            pair[1].date - pair[0].date,
            Duration::days(1),
            "gap between {} and {}",
            pair[0].date,
            pair[1].date
        );
    }
}

#[test]
fn reconciled_series_is_contiguous_across_the_boundary() {
    let series = reconcile(&gapped_input(30, 30), 2020, 2021).unwrap();
    assert_contiguous(&series);
    assert_eq!(
        series.test()[0].date,
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    );
}

#[test]
fn length_is_preserved() {
    let series = reconcile(&gapped_input(25, 40), 2020, 2021).unwrap();
    assert_eq!(series.len(), 65);
    assert_eq!(series.train_len(), 25);
    assert_eq!(series.test().len(), 40);
}

#[test]
fn values_and_order_survive_reindexing() {
    let series = reconcile(&gapped_input(5, 3), 2020, 2021).unwrap();
    let demands: Vec<f64> = series.test().iter().map(|r| r.total_demand).collect();
    assert_eq!(demands, vec![500.0, 501.0, 502.0]);
}

#[test]
fn training_block_keeps_its_own_dates() {
    let input = gapped_input(10, 10);
    let series = reconcile(&input, 2020, 2021).unwrap();
    let original: Vec<NaiveDate> = input[..10].iter().map(|r| r.date).collect();
    let kept: Vec<NaiveDate> = series.train().iter().map(|r| r.date).collect();
    assert_eq!(kept, original);
}

#[test]
fn reindexing_crosses_leap_days_correctly() {
    // 2020 was a leap year; 60 generated days from 2019-12-31 span Feb 29.
    let series = reconcile(&gapped_input(1, 60), 2020, 2021).unwrap();
    assert_contiguous(&series);
    let feb29 = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
    assert!(series.test().iter().any(|r| r.date == feb29));
}

proptest! {
    /// For any non-degenerate block sizes, the reconciled series is strictly
    /// increasing with exactly one day between consecutive entries and no row
    /// lost or gained.
    #[test]
    fn contiguity_and_length_hold(train_len in 1usize..120, test_len in 0usize..120) {
        let series = reconcile(&gapped_input(train_len, test_len), 2020, 2021).unwrap();
        prop_assert_eq!(series.len(), train_len + test_len);
        prop_assert_eq!(series.train_len(), train_len);
        for pair in series.rows().windows(2) {
            prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    /// The demand column is invariant under reconciliation.
    #[test]
    fn demand_column_is_untouched(train_len in 1usize..60, test_len in 0usize..60) {
        let input = gapped_input(train_len, test_len);
        let series = reconcile(&input, 2020, 2021).unwrap();
        let before: Vec<f64> = input.iter().filter_map(|r| r.total_demand).collect();
        prop_assert_eq!(series.actuals(), before);
    }
}
