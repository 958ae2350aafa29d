//! Background worker thread — all loading and computation runs here.
//!
//! The worker owns the dataset cache and the loaded model artifact; the main
//! thread only ever touches `Arc`-shared immutable results. Communication is
//! via `mpsc` channels, one command in, one or more responses out.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use bikecast_core::config::BikecastConfig;
use bikecast_core::data::{DataCache, Timeframe};
use bikecast_core::domain::{DemandRecord, StationRecord};
use bikecast_core::evaluate::{evaluate, Evaluation};
use bikecast_core::forecast::{lag_baseline, GbmModel, ModelChoice};
use bikecast_core::reconcile::{reconcile, ReconciledSeries};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    LoadStations { timeframe: Timeframe },
    LoadDemand { timeframe: Timeframe },
    LoadWeather,
    RunEvaluation { model: ModelChoice, horizon: usize },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Stations {
        timeframe: Timeframe,
        rows: Arc<Vec<StationRecord>>,
    },
    Demand {
        timeframe: Timeframe,
        rows: Arc<Vec<DemandRecord>>,
    },
    Weather {
        series: Arc<ReconciledSeries>,
    },
    EvaluationDone {
        model: ModelChoice,
        horizon: usize,
        evaluation: Box<Evaluation>,
    },
    Error {
        category: &'static str,
        message: String,
        context: String,
    },
}

/// Spawn the worker thread.
pub fn spawn_worker(
    config: BikecastConfig,
    cmd_rx: Receiver<WorkerCommand>,
    resp_tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut worker = Worker {
            config,
            cache: DataCache::new(),
            model: None,
        };
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                WorkerCommand::Shutdown => break,
                other => worker.handle(other, &resp_tx),
            }
        }
    })
}

struct Worker {
    config: BikecastConfig,
    cache: DataCache,
    /// Model artifact, loaded once on first use.
    model: Option<Arc<GbmModel>>,
}

impl Worker {
    fn handle(&mut self, cmd: WorkerCommand, tx: &Sender<WorkerResponse>) {
        match cmd {
            WorkerCommand::LoadStations { timeframe } => {
                let path = self.config.stations_path(timeframe);
                match self.cache.stations(&path) {
                    Ok(rows) => {
                        let _ = tx.send(WorkerResponse::Stations { timeframe, rows });
                    }
                    Err(e) => send_error(tx, "data", e.to_string(), path.display().to_string()),
                }
            }
            WorkerCommand::LoadDemand { timeframe } => {
                let path = self.config.demand_path(timeframe);
                match self.cache.demand(&path) {
                    Ok(rows) => {
                        let _ = tx.send(WorkerResponse::Demand { timeframe, rows });
                    }
                    Err(e) => send_error(tx, "data", e.to_string(), path.display().to_string()),
                }
            }
            WorkerCommand::LoadWeather => match self.reconciled() {
                Ok(series) => {
                    let _ = tx.send(WorkerResponse::Weather {
                        series: Arc::new(series),
                    });
                }
                Err((category, message)) => {
                    send_error(tx, category, message, "weather data".into())
                }
            },
            WorkerCommand::RunEvaluation { model, horizon } => {
                match self.run_evaluation(model, horizon) {
                    Ok(evaluation) => {
                        let _ = tx.send(WorkerResponse::EvaluationDone {
                            model,
                            horizon,
                            evaluation: Box::new(evaluation),
                        });
                    }
                    Err((category, message)) => {
                        send_error(tx, category, message, format!("{} / {horizon}d", model.label()))
                    }
                }
            }
            WorkerCommand::Shutdown => {}
        }
    }

    /// Load + reconcile the combined dataset. Cheap enough to redo per
    /// request; the parse itself is cached.
    fn reconciled(&mut self) -> Result<ReconciledSeries, (&'static str, String)> {
        let path = self.config.combined_path();
        let raw = self
            .cache
            .combined(&path)
            .map_err(|e| ("data", e.to_string()))?;
        reconcile(
            &raw,
            self.config.train_cutoff_year,
            self.config.test_start_year,
        )
        .map_err(|e| ("data", e.to_string()))
    }

    fn run_evaluation(
        &mut self,
        model: ModelChoice,
        horizon: usize,
    ) -> Result<Evaluation, (&'static str, String)> {
        let series = self.reconciled()?;
        let forecast = match model {
            ModelChoice::Baseline => lag_baseline(&series),
            ModelChoice::GradientBoosted => {
                let gbm = self.gbm()?;
                gbm.forecast_series(&series)
                    .map_err(|e| ("model", e.to_string()))?
            }
        };
        evaluate(&series, horizon, &forecast).map_err(|e| ("eval", e.to_string()))
    }

    fn gbm(&mut self) -> Result<Arc<GbmModel>, (&'static str, String)> {
        if let Some(model) = &self.model {
            return Ok(Arc::clone(model));
        }
        let model = GbmModel::load(&self.config.model_path)
            .map(Arc::new)
            .map_err(|e| ("model", e.to_string()))?;
        self.model = Some(Arc::clone(&model));
        Ok(model)
    }
}

fn send_error(
    tx: &Sender<WorkerResponse>,
    category: &'static str,
    message: String,
    context: String,
) {
    let _ = tx.send(WorkerResponse::Error {
        category,
        message,
        context,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::mpsc;

    fn write_file(path: &std::path::Path, body: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    fn test_config(dir: &std::path::Path) -> BikecastConfig {
        std::fs::create_dir_all(dir.join("data")).unwrap();
        write_file(
            &dir.join("data/combined_data.csv"),
            "date,total_demand,temp_obs,prcp\n\
             2019-12-27,100,150,0\n2019-12-28,110,150,0\n2019-12-29,120,150,0\n\
             2019-12-30,130,150,0\n2019-12-31,140,150,0\n\
             2022-01-01,200,160,0\n2022-01-02,210,160,0\n2022-01-03,220,160,0\n",
        );
        BikecastConfig {
            data_dir: dir.join("data"),
            ..BikecastConfig::default()
        }
    }

    #[test]
    fn evaluation_round_trip_through_the_worker() {
        let dir = tempfile::tempdir().unwrap();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(test_config(dir.path()), cmd_rx, resp_tx);

        cmd_tx
            .send(WorkerCommand::RunEvaluation {
                model: ModelChoice::Baseline,
                horizon: 3,
            })
            .unwrap();
        let resp = resp_rx.recv().unwrap();
        match resp {
            WorkerResponse::EvaluationDone { evaluation, .. } => {
                assert_eq!(evaluation.window.len(), 8); // 5 lookback + 3 horizon
                assert!(evaluation.mape_percent.is_some());
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn missing_data_surfaces_as_a_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = BikecastConfig {
            data_dir: dir.path().join("nope"),
            ..BikecastConfig::default()
        };
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(config, cmd_rx, resp_tx);

        cmd_tx.send(WorkerCommand::LoadWeather).unwrap();
        match resp_rx.recv().unwrap() {
            WorkerResponse::Error { category, .. } => assert_eq!(category, "data"),
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
