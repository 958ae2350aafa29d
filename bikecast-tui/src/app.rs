//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use bikecast_core::aggregate::RankCriterion;
use bikecast_core::config::BikecastConfig;
use bikecast_core::data::Timeframe;
use bikecast_core::domain::{DemandRecord, StationRecord};
use bikecast_core::evaluate::Evaluation;
use bikecast_core::forecast::ModelChoice;
use bikecast_core::reconcile::ReconciledSeries;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Stations,
    Demand,
    Weather,
    Forecast,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Stations => 0,
            Panel::Demand => 1,
            Panel::Weather => 2,
            Panel::Forecast => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Stations),
            1 => Some(Panel::Demand),
            2 => Some(Panel::Weather),
            3 => Some(Panel::Forecast),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Stations => "Stations",
            Panel::Demand => "Demand",
            Panel::Weather => "Weather",
            Panel::Forecast => "Forecast",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 5).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 4) % 5).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Model,
    Eval,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Data => "DATA",
            ErrorCategory::Model => "MODEL",
            ErrorCategory::Eval => "EVAL",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Which overlay is on top, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Welcome,
    ErrorHistory,
    None,
}

/// Stations panel — timeframe, ranking direction, and slider count.
#[derive(Debug)]
pub struct StationsPanelState {
    pub timeframe: Timeframe,
    pub criterion: RankCriterion,
    pub count: usize,
    pub rows: Option<Arc<Vec<StationRecord>>>,
    pub loading: bool,
}

/// Demand panel — the rentals-over-time curve.
#[derive(Debug)]
pub struct DemandPanelState {
    pub timeframe: Timeframe,
    pub rows: Option<Arc<Vec<DemandRecord>>>,
    pub loading: bool,
}

/// Weather panel — monthly averages over the reconciled combined series.
#[derive(Debug)]
pub struct WeatherPanelState {
    pub series: Option<Arc<ReconciledSeries>>,
    pub loading: bool,
}

/// Forecast panel — model/horizon selection plus the latest evaluation.
#[derive(Debug)]
pub struct ForecastPanelState {
    pub model: ModelChoice,
    pub horizons: Vec<usize>,
    pub horizon_idx: usize,
    pub evaluation: Option<Evaluation>,
    pub table_scroll: usize,
    pub running: bool,
}

impl ForecastPanelState {
    pub fn horizon(&self) -> usize {
        self.horizons.get(self.horizon_idx).copied().unwrap_or(7)
    }
}

/// The whole application state.
pub struct AppState {
    pub running: bool,
    pub active_panel: Panel,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub state_path: PathBuf,
    pub config: BikecastConfig,

    pub stations: StationsPanelState,
    pub demand: DemandPanelState,
    pub weather: WeatherPanelState,
    pub forecast: ForecastPanelState,
}

const ERROR_HISTORY_CAP: usize = 100;

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
        config: BikecastConfig,
    ) -> Self {
        let horizons = if config.horizons.is_empty() {
            bikecast_core::evaluate::HORIZONS.to_vec()
        } else {
            config.horizons.clone()
        };
        Self {
            running: true,
            active_panel: Panel::Stations,
            overlay: Overlay::Welcome,
            status_message: None,
            error_history: VecDeque::new(),
            error_scroll: 0,
            worker_tx,
            worker_rx,
            state_path,
            stations: StationsPanelState {
                timeframe: Timeframe::Daily,
                criterion: RankCriterion::Best,
                count: config.station_rank_default,
                rows: None,
                loading: false,
            },
            demand: DemandPanelState {
                timeframe: Timeframe::Daily,
                rows: None,
                loading: false,
            },
            weather: WeatherPanelState {
                series: None,
                loading: false,
            },
            forecast: ForecastPanelState {
                model: ModelChoice::Baseline,
                horizons,
                horizon_idx: 1, // 7 days
                evaluation: None,
                table_scroll: 0,
                running: false,
            },
            config,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn push_error(
        &mut self,
        category: ErrorCategory,
        message: impl Into<String>,
        context: impl Into<String>,
    ) {
        let message = message.into();
        self.status_message = Some((message.clone(), StatusLevel::Error));
        self.error_history.push_front(ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message,
            context: context.into(),
        });
        self.error_history.truncate(ERROR_HISTORY_CAP);
    }

    /// Switch the active panel and request its data if it has none.
    pub fn switch_panel(&mut self, panel: Panel) {
        self.active_panel = panel;
        self.request_panel_data(panel);
    }

    /// Ask the worker for whatever the given panel needs but doesn't have yet.
    pub fn request_panel_data(&mut self, panel: Panel) {
        match panel {
            Panel::Stations if self.stations.rows.is_none() && !self.stations.loading => {
                self.stations.loading = true;
                let _ = self.worker_tx.send(WorkerCommand::LoadStations {
                    timeframe: self.stations.timeframe,
                });
            }
            Panel::Demand if self.demand.rows.is_none() && !self.demand.loading => {
                self.demand.loading = true;
                let _ = self.worker_tx.send(WorkerCommand::LoadDemand {
                    timeframe: self.demand.timeframe,
                });
            }
            Panel::Weather if self.weather.series.is_none() && !self.weather.loading => {
                self.weather.loading = true;
                let _ = self.worker_tx.send(WorkerCommand::LoadWeather);
            }
            _ => {}
        }
    }

    /// Kick off an evaluation for the current model/horizon selection.
    pub fn run_evaluation(&mut self) {
        if self.forecast.running {
            return;
        }
        self.forecast.running = true;
        self.set_status(format!(
            "Evaluating {} over {} day(s)...",
            self.forecast.model.label(),
            self.forecast.horizon()
        ));
        let _ = self.worker_tx.send(WorkerCommand::RunEvaluation {
            model: self.forecast.model,
            horizon: self.forecast.horizon(),
        });
    }
}
