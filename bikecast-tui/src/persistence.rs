//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use bikecast_core::aggregate::RankCriterion;
use bikecast_core::data::Timeframe;
use bikecast_core::forecast::ModelChoice;

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_panel: Panel,
    pub stations_timeframe: Timeframe,
    pub stations_criterion: RankCriterion,
    pub stations_count: usize,
    pub demand_timeframe: Timeframe,
    pub model: ModelChoice,
    pub horizon_idx: usize,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_panel: Panel::Stations,
            stations_timeframe: Timeframe::Daily,
            stations_criterion: RankCriterion::Best,
            stations_count: 10,
            demand_timeframe: Timeframe::Daily,
            model: ModelChoice::Baseline,
            horizon_idx: 1,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        active_panel: app.active_panel,
        stations_timeframe: app.stations.timeframe,
        stations_criterion: app.stations.criterion,
        stations_count: app.stations.count,
        demand_timeframe: app.demand.timeframe,
        model: app.forecast.model,
        horizon_idx: app.forecast.horizon_idx,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.active_panel = state.active_panel;
    app.stations.timeframe = state.stations_timeframe;
    app.stations.criterion = state.stations_criterion;
    app.stations.count = state
        .stations_count
        .clamp(app.config.station_rank_min, app.config.station_rank_max);
    app.demand.timeframe = state.demand_timeframe;
    app.forecast.model = state.model;
    if state.horizon_idx < app.forecast.horizons.len() {
        app.forecast.horizon_idx = state.horizon_idx;
    }
    if state.welcome_dismissed {
        app.overlay = Overlay::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = PersistedState {
            active_panel: Panel::Forecast,
            stations_count: 25,
            model: ModelChoice::GradientBoosted,
            welcome_dismissed: true,
            ..PersistedState::default()
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.active_panel, Panel::Forecast);
        assert_eq!(loaded.stations_count, 25);
        assert_eq!(loaded.model, ModelChoice::GradientBoosted);
        assert!(loaded.welcome_dismissed);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.active_panel, Panel::Stations);
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.stations_count, 10);
    }
}
