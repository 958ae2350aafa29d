//! Forecast evaluation — window slicing plus the MAPE/RMSE pair.
//!
//! Given a reconciled series and a forecast column aligned with it, slice the
//! evaluation window (a short trailing piece of training data for context,
//! followed by the first N test days) and score the forecast over the N test
//! days only.

use chrono::NaiveDate;
use thiserror::Error;

use crate::metrics::{self, round2};
use crate::reconcile::ReconciledSeries;

/// Training rows shown before the forecast region. Display context only —
/// never included in metric computation.
pub const LOOKBACK: usize = 5;

/// Forecast horizons offered by the dashboard, in days.
pub const HORIZONS: [usize; 4] = [1, 7, 30, 90];

/// Structured errors for evaluation. These indicate upstream bugs, not user
/// input problems, and are fatal to the call.
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("forecast column misaligned: series has {series_len} rows, forecast has {forecast_len}")]
    MisalignedColumns {
        series_len: usize,
        forecast_len: usize,
    },

    #[error("horizon must be at least one day")]
    ZeroHorizon,

    #[error("forecast value for {date} (row {index}) is not finite")]
    NonFiniteForecast { index: usize, date: NaiveDate },
}

/// Non-fatal conditions the caller should surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalWarning {
    /// Fewer test rows than the requested horizon; metrics cover what exists.
    PartialHorizon { requested: usize, available: usize },
    /// Zero-valued actuals excluded from the MAPE mean.
    ZeroActuals { excluded: usize },
}

impl std::fmt::Display for EvalWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalWarning::PartialHorizon {
                requested,
                available,
            } => write!(
                f,
                "only {available} of {requested} requested forecast days available"
            ),
            EvalWarning::ZeroActuals { excluded } => {
                write!(f, "{excluded} zero-demand day(s) excluded from MAPE")
            }
        }
    }
}

/// One row of the evaluation window, at calendar-date granularity.
///
/// `forecast` is `None` where the forecast is undefined (the lag baseline's
/// warm-up rows inside the lookback prefix).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRow {
    pub date: NaiveDate,
    pub actual: f64,
    pub forecast: Option<f64>,
}

/// The evaluation window plus the metric pair.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Lookback rows followed by forecast-region rows.
    pub window: Vec<WindowRow>,
    /// How many leading rows of `window` are lookback context.
    pub lookback_len: usize,
    /// Date of the last lookback row — the chart's boundary marker.
    pub boundary_date: Option<NaiveDate>,
    pub horizon_requested: usize,
    pub horizon_used: usize,
    /// MAPE as a percentage, rounded to 2 decimals. `None` when every
    /// evaluated point had a zero actual.
    pub mape_percent: Option<f64>,
    /// RMSE rounded to 2 decimals.
    pub rmse: f64,
    pub warnings: Vec<EvalWarning>,
}

impl Evaluation {
    /// The lookback (context) prefix of the window.
    pub fn lookback_rows(&self) -> &[WindowRow] {
        &self.window[..self.lookback_len]
    }

    /// The forecast-region rows the metrics were computed over.
    pub fn forecast_rows(&self) -> &[WindowRow] {
        &self.window[self.lookback_len..]
    }
}

/// Score `forecast` against the series' demand over the first `horizon_days`
/// test days.
///
/// `forecast` must be index-aligned with `series.rows()`. Non-finite forecast
/// values are tolerated in the lookback prefix (shown as missing) but are an
/// error inside the evaluated horizon.
pub fn evaluate(
    series: &ReconciledSeries,
    horizon_days: usize,
    forecast: &[f64],
) -> Result<Evaluation, EvaluateError> {
    if horizon_days == 0 {
        return Err(EvaluateError::ZeroHorizon);
    }
    if forecast.len() != series.len() {
        return Err(EvaluateError::MisalignedColumns {
            series_len: series.len(),
            forecast_len: forecast.len(),
        });
    }

    let train_len = series.train_len();
    let test_len = series.len() - train_len;
    let lookback_len = LOOKBACK.min(train_len);
    let horizon_used = horizon_days.min(test_len);

    let mut warnings = Vec::new();
    if horizon_used < horizon_days {
        warnings.push(EvalWarning::PartialHorizon {
            requested: horizon_days,
            available: horizon_used,
        });
    }

    let start = train_len - lookback_len;
    let end = train_len + horizon_used;

    let mut window = Vec::with_capacity(end - start);
    for (i, row) in series.rows()[start..end].iter().enumerate() {
        let idx = start + i;
        let value = forecast[idx];
        let in_horizon = idx >= train_len;
        if in_horizon && !value.is_finite() {
            return Err(EvaluateError::NonFiniteForecast {
                index: idx,
                date: row.date,
            });
        }
        window.push(WindowRow {
            date: row.date,
            actual: row.total_demand,
            forecast: value.is_finite().then_some(value),
        });
    }

    let actual: Vec<f64> = window[lookback_len..].iter().map(|r| r.actual).collect();
    let predicted: Vec<f64> = window[lookback_len..]
        .iter()
        .map(|r| r.forecast.unwrap_or(f64::NAN))
        .collect();

    let mape = metrics::mape(&actual, &predicted);
    if mape.excluded_zeros > 0 {
        warnings.push(EvalWarning::ZeroActuals {
            excluded: mape.excluded_zeros,
        });
    }

    Ok(Evaluation {
        boundary_date: window[..lookback_len].last().map(|r| r.date),
        window,
        lookback_len,
        horizon_requested: horizon_days,
        horizon_used,
        mape_percent: mape.percent.map(round2),
        rmse: round2(metrics::rmse(&actual, &predicted)),
        warnings,
    })
}
