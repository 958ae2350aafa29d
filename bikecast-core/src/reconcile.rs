//! Train/test date-index reconciliation.
//!
//! The combined dataset arrives with two disjoint contiguous blocks: a training
//! block (years before the cutoff) and a test block (years after the gap), with
//! the years in between deliberately dropped from the source. Reconciliation
//! rebuilds one contiguous daily series by re-indexing the test block to start
//! the day after the last training date, so evaluation windows can be sliced
//! across the boundary.

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

use crate::domain::{CombinedRecord, RawCombinedRecord};

/// Structured errors for reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("training block is empty: no row has a year earlier than {train_cutoff_year}")]
    EmptyTrainingBlock { train_cutoff_year: i32 },

    #[error("invalid year range: train cutoff {train_cutoff_year} is after test start {test_start_year}")]
    InvalidYearRange {
        train_cutoff_year: i32,
        test_start_year: i32,
    },
}

/// A contiguous date-indexed series: training rows followed by re-indexed test
/// rows, with incomplete rows removed.
///
/// `train_len` marks the boundary, so callers slice train/test without
/// re-deriving year predicates against the rewritten dates.
#[derive(Debug, Clone)]
pub struct ReconciledSeries {
    rows: Vec<CombinedRecord>,
    train_len: usize,
}

impl ReconciledSeries {
    pub fn rows(&self) -> &[CombinedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to the original training block.
    pub fn train(&self) -> &[CombinedRecord] {
        &self.rows[..self.train_len]
    }

    /// Rows belonging to the re-indexed test block.
    pub fn test(&self) -> &[CombinedRecord] {
        &self.rows[self.train_len..]
    }

    pub fn train_len(&self) -> usize {
        self.train_len
    }

    /// Last training date (the anchor the test block was re-indexed from).
    pub fn boundary_date(&self) -> Option<NaiveDate> {
        self.train().last().map(|r| r.date)
    }

    /// The `total_demand` column, index-aligned with `rows()`.
    pub fn actuals(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total_demand).collect()
    }
}

/// Rebuild a contiguous series from a gapped one.
///
/// Training block: rows with `year < train_cutoff_year`. Test block: rows with
/// `year > test_start_year`. Rows in the boundary years are the intentionally
/// dropped gap and appear in neither block. Input rows are expected in
/// chronological order with unique dates (as the source files are).
pub fn reconcile(
    rows: &[RawCombinedRecord],
    train_cutoff_year: i32,
    test_start_year: i32,
) -> Result<ReconciledSeries, ReconcileError> {
    if train_cutoff_year > test_start_year {
        return Err(ReconcileError::InvalidYearRange {
            train_cutoff_year,
            test_start_year,
        });
    }

    let train: Vec<RawCombinedRecord> = rows
        .iter()
        .filter(|r| r.date.year() < train_cutoff_year)
        .cloned()
        .collect();
    let test: Vec<RawCombinedRecord> = rows
        .iter()
        .filter(|r| r.date.year() > test_start_year)
        .cloned()
        .collect();

    if train.is_empty() {
        return Err(ReconcileError::EmptyTrainingBlock { train_cutoff_year });
    }

    Ok(reconcile_blocks(train, test))
}

/// Re-index `test` to immediately follow `train` and concatenate.
///
/// The test block keeps its values and row order but gets fresh consecutive
/// daily dates starting the day after the last training date. A test block
/// whose dates already form that continuation comes out unchanged. Rows with
/// missing values drop out *after* re-indexing, so contiguity is computed over
/// the full block first.
pub fn reconcile_blocks(
    train: Vec<RawCombinedRecord>,
    test: Vec<RawCombinedRecord>,
) -> ReconciledSeries {
    let train_last = train.iter().map(|r| r.date).max();

    let reindexed = test.into_iter().enumerate().map(|(i, r)| {
        match train_last {
            Some(anchor) => RawCombinedRecord {
                date: anchor + Duration::days(i as i64 + 1),
                ..r
            },
            // Degenerate: nothing to anchor on, keep the row as-is. The
            // year-classified entry point rejects this before we get here.
            None => r,
        }
    });

    // Cleanup pass: incomplete rows drop out only after the new index exists.
    let mut rows = Vec::new();
    let mut train_len = 0;
    for row in train.into_iter().chain(reindexed) {
        if let Some(complete) = row.complete() {
            if train_last.is_some_and(|anchor| complete.date <= anchor) {
                train_len += 1;
            }
            rows.push(complete);
        }
    }

    ReconciledSeries { rows, train_len }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, demand: f64) -> RawCombinedRecord {
        RawCombinedRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total_demand: Some(demand),
            temp_obs: Some(200.0),
            prcp: Some(0.0),
        }
    }

    #[test]
    fn test_block_resumes_day_after_training() {
        let rows = vec![
            raw("2019-12-30", 10.0),
            raw("2019-12-31", 11.0),
            raw("2022-01-01", 12.0),
            raw("2022-01-02", 13.0),
        ];

        let series = reconcile(&rows, 2020, 2021).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series.train_len(), 2);
        let dates: Vec<String> = series.rows().iter().map(|r| r.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2019-12-30", "2019-12-31", "2020-01-01", "2020-01-02"]
        );
        // Values travel with the rows, untouched.
        assert_eq!(series.test()[0].total_demand, 12.0);
    }

    #[test]
    fn gap_years_appear_in_neither_block() {
        let rows = vec![
            raw("2019-12-31", 10.0),
            raw("2020-06-15", 99.0),
            raw("2021-06-15", 98.0),
            raw("2022-01-01", 12.0),
        ];

        let series = reconcile(&rows, 2020, 2021).unwrap();

        assert_eq!(series.len(), 2);
        assert!(series.rows().iter().all(|r| r.total_demand != 99.0));
        assert!(series.rows().iter().all(|r| r.total_demand != 98.0));
    }

    #[test]
    fn empty_test_block_returns_training_unchanged() {
        let rows = vec![raw("2019-12-30", 10.0), raw("2019-12-31", 11.0)];
        let series = reconcile(&rows, 2020, 2021).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.test().is_empty());
        assert_eq!(series.boundary_date().unwrap().to_string(), "2019-12-31");
    }

    #[test]
    fn empty_training_block_is_an_error() {
        let rows = vec![raw("2022-01-01", 12.0)];
        let err = reconcile(&rows, 2020, 2021).unwrap_err();
        assert!(matches!(err, ReconcileError::EmptyTrainingBlock { .. }));
    }

    #[test]
    fn inverted_year_range_is_an_error() {
        let rows = vec![raw("2019-12-31", 10.0)];
        let err = reconcile(&rows, 2022, 2020).unwrap_err();
        assert!(matches!(err, ReconcileError::InvalidYearRange { .. }));
    }

    #[test]
    fn equal_boundary_years_leave_a_single_gap_year() {
        let rows = vec![
            raw("2019-12-31", 10.0),
            raw("2020-07-01", 99.0),
            raw("2021-01-01", 12.0),
        ];
        let series = reconcile(&rows, 2020, 2020).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.test()[0].date.to_string(), "2020-01-01");
    }

    #[test]
    fn incomplete_rows_drop_after_reindexing() {
        let mut hole = raw("2022-01-01", 12.0);
        hole.temp_obs = None;
        let rows = vec![raw("2019-12-31", 10.0), hole, raw("2022-01-02", 13.0)];

        let series = reconcile(&rows, 2020, 2021).unwrap();

        // The incomplete row consumed 2020-01-01 before dropping out, so the
        // surviving test row keeps the date it was assigned in the full block.
        assert_eq!(series.len(), 2);
        assert_eq!(series.test()[0].date.to_string(), "2020-01-02");
        assert_eq!(series.test()[0].total_demand, 13.0);
    }

    #[test]
    fn already_contiguous_blocks_come_out_unchanged() {
        let train = vec![raw("2019-12-30", 10.0), raw("2019-12-31", 11.0)];
        let test = vec![raw("2020-01-01", 12.0), raw("2020-01-02", 13.0)];

        let series = reconcile_blocks(train.clone(), test.clone());

        let expected: Vec<CombinedRecord> = train
            .iter()
            .chain(test.iter())
            .map(|r| r.complete().unwrap())
            .collect();
        assert_eq!(series.rows(), expected.as_slice());
        assert_eq!(series.train_len(), 2);
    }
}
