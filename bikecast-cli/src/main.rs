//! Bikecast CLI — forecast evaluation and data summaries without the TUI.
//!
//! Commands:
//! - `evaluate` — reconcile the combined dataset, forecast, and print MAPE/RMSE
//! - `stations` — print the top/bottom station ranking
//! - `weather` — print monthly temperature and rainfall averages

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use bikecast_core::aggregate::{
    demand_curve, monthly_average, rank_stations, RankCriterion, WeatherField,
};
use bikecast_core::config::BikecastConfig;
use bikecast_core::data::{DataCache, Timeframe};
use bikecast_core::evaluate::{evaluate, Evaluation};
use bikecast_core::forecast::{lag_baseline, GbmModel, ModelChoice};
use bikecast_core::reconcile::{reconcile, ReconciledSeries};

#[derive(Parser)]
#[command(name = "bikecast", about = "Bike-share demand forecasting toolkit")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "bikecast.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a forecast model over a horizon and print the metric pair.
    Evaluate {
        /// Forecast model to evaluate.
        #[arg(long, value_enum, default_value_t = ModelArg::Baseline)]
        model: ModelArg,

        /// Horizon in days.
        #[arg(long, default_value_t = 7)]
        horizon: usize,

        /// Print the full evaluation window instead of just the forecast region.
        #[arg(long, default_value_t = false)]
        full_window: bool,
    },
    /// Print the top/bottom stations by average rentals.
    Stations {
        /// Aggregation timeframe of the station file to read.
        #[arg(long, value_enum, default_value_t = TimeframeArg::Daily)]
        timeframe: TimeframeArg,

        /// Rank from the best or the worst end.
        #[arg(long, value_enum, default_value_t = CriterionArg::Best)]
        criterion: CriterionArg,

        /// How many stations to print.
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Print monthly temperature and rainfall averages.
    Weather,
    /// Print the citywide demand curve.
    Demand {
        /// Aggregation timeframe of the demand file to read.
        #[arg(long, value_enum, default_value_t = TimeframeArg::Daily)]
        timeframe: TimeframeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Baseline,
    Gbm,
}

impl From<ModelArg> for ModelChoice {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Baseline => ModelChoice::Baseline,
            ModelArg::Gbm => ModelChoice::GradientBoosted,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeframeArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<TimeframeArg> for Timeframe {
    fn from(arg: TimeframeArg) -> Self {
        match arg {
            TimeframeArg::Daily => Timeframe::Daily,
            TimeframeArg::Weekly => Timeframe::Weekly,
            TimeframeArg::Monthly => Timeframe::Monthly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CriterionArg {
    Best,
    Worst,
}

impl From<CriterionArg> for RankCriterion {
    fn from(arg: CriterionArg) -> Self {
        match arg {
            CriterionArg::Best => RankCriterion::Best,
            CriterionArg::Worst => RankCriterion::Worst,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BikecastConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Evaluate {
            model,
            horizon,
            full_window,
        } => run_evaluate(&config, model.into(), horizon, full_window),
        Commands::Stations {
            timeframe,
            criterion,
            count,
        } => run_stations(&config, timeframe.into(), criterion.into(), count),
        Commands::Weather => run_weather(&config),
        Commands::Demand { timeframe } => run_demand(&config, timeframe.into()),
    }
}

fn load_reconciled(config: &BikecastConfig, cache: &mut DataCache) -> Result<ReconciledSeries> {
    let path = config.combined_path();
    let raw = cache
        .combined(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let series = reconcile(&raw, config.train_cutoff_year, config.test_start_year)?;
    Ok(series)
}

fn run_evaluate(
    config: &BikecastConfig,
    model: ModelChoice,
    horizon: usize,
    full_window: bool,
) -> Result<()> {
    let mut cache = DataCache::new();
    let series = load_reconciled(config, &mut cache)?;

    let forecast = match model {
        ModelChoice::Baseline => lag_baseline(&series),
        ModelChoice::GradientBoosted => {
            let gbm = GbmModel::load(&config.model_path)
                .with_context(|| format!("loading model from {}", config.model_path.display()))?;
            gbm.forecast_series(&series)?
        }
    };

    let eval = evaluate(&series, horizon, &forecast)?;
    for warning in &eval.warnings {
        eprintln!("warning: {warning}");
    }

    println!(
        "{} over {} of {} day(s)",
        model.label(),
        eval.horizon_used,
        eval.horizon_requested
    );
    if let Some(boundary) = eval.boundary_date {
        println!("train/test boundary: {boundary}");
    }
    match eval.mape_percent {
        Some(p) => println!("MAPE: {p:.2}%"),
        None => println!("MAPE: n/a (all evaluated actuals were zero)"),
    }
    println!("RMSE: {:.2}", eval.rmse);
    println!();

    print_window(&eval, full_window);
    Ok(())
}

fn print_window(eval: &Evaluation, full_window: bool) {
    let rows = if full_window {
        &eval.window[..]
    } else {
        eval.forecast_rows()
    };

    println!(
        "{:<12} {:>12} {:>12} {:>10}",
        "date", "actual", "forecast", "error"
    );
    for row in rows {
        match row.forecast {
            Some(v) => println!(
                "{:<12} {:>12.1} {:>12.1} {:>+10.1}",
                row.date,
                row.actual,
                v,
                v - row.actual
            ),
            None => println!("{:<12} {:>12.1} {:>12} {:>10}", row.date, row.actual, "-", "-"),
        }
    }
}

fn run_stations(
    config: &BikecastConfig,
    timeframe: Timeframe,
    criterion: RankCriterion,
    count: usize,
) -> Result<()> {
    let mut cache = DataCache::new();
    let path = config.stations_path(timeframe);
    let stations = cache
        .stations(&path)
        .with_context(|| format!("reading {}", path.display()))?;

    let ranked = rank_stations(&stations, criterion, count);
    println!(
        "{} {} stations by average rentals ({})",
        criterion.label(),
        ranked.len(),
        timeframe.label()
    );
    println!(
        "{:>4} {:>8} {:<40} {:>10} {:>10} {:>10}",
        "#", "id", "station", "avg", "lat", "lon"
    );
    for (i, st) in ranked.iter().enumerate() {
        println!(
            "{:>4} {:>8} {:<40} {:>10.1} {:>10.4} {:>10.4}",
            i + 1,
            st.start_station_id,
            st.start_station_name,
            st.bike_counts,
            st.lat,
            st.lon
        );
    }
    Ok(())
}

fn run_weather(config: &BikecastConfig) -> Result<()> {
    let mut cache = DataCache::new();
    let series = load_reconciled(config, &mut cache)?;

    let temps = monthly_average(series.rows(), WeatherField::TempObs);
    let rain = monthly_average(series.rows(), WeatherField::Prcp);

    println!(
        "{:<6} {:>20} {:>20}",
        "month",
        format!("temp ({})", WeatherField::TempObs.unit()),
        format!("rain ({})", WeatherField::Prcp.unit())
    );
    for m in 0..12 {
        let fmt = |v: Option<f64>| match v {
            Some(v) => format!("{v:.1}"),
            None => "-".to_string(),
        };
        println!("{:<6} {:>20} {:>20}", m + 1, fmt(temps[m]), fmt(rain[m]));
    }
    Ok(())
}

fn run_demand(config: &BikecastConfig, timeframe: Timeframe) -> Result<()> {
    let mut cache = DataCache::new();
    let path = config.demand_path(timeframe);
    let rows = cache
        .demand(&path)
        .with_context(|| format!("reading {}", path.display()))?;

    let curve = demand_curve(&rows);
    println!("{:<12} {:>12}", "date", "rentals");
    for (date, rentals) in &curve {
        println!("{:<12} {:>12.1}", date, rentals);
    }
    Ok(())
}
