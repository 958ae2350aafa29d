//! Criterion benchmarks for the recompute-per-interaction path.
//!
//! Benchmarks:
//! 1. Reconciliation over multi-year inputs
//! 2. Full forecast evaluation (reconcile → lag baseline → evaluate)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bikecast_core::domain::RawCombinedRecord;
use bikecast_core::evaluate::evaluate;
use bikecast_core::forecast::lag_baseline;
use bikecast_core::reconcile::reconcile;

fn gapped_input(train_len: usize, test_len: usize) -> Vec<RawCombinedRecord> {
    let train_end = chrono::NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
    let test_start = chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let mut rows = Vec::new();
    for i in (0..train_len).rev() {
        rows.push(RawCombinedRecord {
            date: train_end - chrono::Duration::days(i as i64),
            total_demand: Some(10_000.0 + (i as f64 * 0.1).sin() * 3_000.0),
            temp_obs: Some(150.0 + (i as f64 * 0.05).cos() * 100.0),
            prcp: Some(if i % 4 == 0 { 30.0 } else { 0.0 }),
        });
    }
    for i in 0..test_len {
        rows.push(RawCombinedRecord {
            date: test_start + chrono::Duration::days(i as i64),
            total_demand: Some(11_000.0 + (i as f64 * 0.1).sin() * 3_000.0),
            temp_obs: Some(160.0),
            prcp: Some(0.0),
        });
    }
    rows
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for years in [1usize, 3, 5] {
        let rows = gapped_input(365 * years, 180);
        group.bench_with_input(BenchmarkId::from_parameter(years), &rows, |b, rows| {
            b.iter(|| reconcile(black_box(rows), 2020, 2021).unwrap());
        });
    }
    group.finish();
}

fn bench_full_evaluation(c: &mut Criterion) {
    let rows = gapped_input(365 * 3, 180);
    c.bench_function("reconcile_baseline_evaluate_90d", |b| {
        b.iter(|| {
            let series = reconcile(black_box(&rows), 2020, 2021).unwrap();
            let forecast = lag_baseline(&series);
            evaluate(&series, 90, &forecast).unwrap()
        });
    });
}

criterion_group!(benches, bench_reconcile, bench_full_evaluation);
criterion_main!(benches);
