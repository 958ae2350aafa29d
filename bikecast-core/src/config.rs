//! Dashboard configuration — `bikecast.toml`.
//!
//! Defaults mirror the published dataset: training years end in 2019, the test
//! period resumes in 2022, and the forecast page offers 1/7/30/90-day horizons.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Timeframe;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the dashboard and CLI need to find data and slice it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BikecastConfig {
    /// Directory holding the CSV datasets.
    pub data_dir: PathBuf,
    /// Serialized gradient-boosted model artifact.
    pub model_path: PathBuf,
    /// Training block: rows with year strictly below this.
    pub train_cutoff_year: i32,
    /// Test block: rows with year strictly above this.
    pub test_start_year: i32,
    /// Forecast horizons offered, in days.
    pub horizons: Vec<usize>,
    /// Station-ranking slider bounds and starting value.
    pub station_rank_min: usize,
    pub station_rank_max: usize,
    pub station_rank_default: usize,
}

impl Default for BikecastConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            model_path: PathBuf::from("models/gbm_demand.json"),
            train_cutoff_year: 2020,
            test_start_year: 2021,
            horizons: crate::evaluate::HORIZONS.to_vec(),
            station_rank_min: 5,
            station_rank_max: 50,
            station_rank_default: 10,
        }
    }
}

impl BikecastConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Load from a TOML file, falling back to defaults when the file is
    /// absent. A present-but-malformed file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn combined_path(&self) -> PathBuf {
        self.data_dir.join("combined_data.csv")
    }

    pub fn demand_path(&self, timeframe: Timeframe) -> PathBuf {
        self.data_dir.join(format!("{}.csv", timeframe.label()))
    }

    pub fn stations_path(&self, timeframe: Timeframe) -> PathBuf {
        self.data_dir
            .join(format!("{}_avg_by_station.csv", timeframe.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_published_dataset() {
        let cfg = BikecastConfig::default();
        assert_eq!(cfg.train_cutoff_year, 2020);
        assert_eq!(cfg.test_start_year, 2021);
        assert_eq!(cfg.horizons, vec![1, 7, 30, 90]);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: BikecastConfig = toml::from_str("train_cutoff_year = 2018").unwrap();
        assert_eq!(cfg.train_cutoff_year, 2018);
        assert_eq!(cfg.test_start_year, 2021);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn paths_compose_from_data_dir() {
        let cfg = BikecastConfig::default();
        assert_eq!(
            cfg.stations_path(Timeframe::Weekly),
            PathBuf::from("data/weekly_avg_by_station.csv")
        );
        assert_eq!(cfg.combined_path(), PathBuf::from("data/combined_data.csv"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = BikecastConfig::load_or_default(Path::new("/nonexistent/bikecast.toml")).unwrap();
        assert_eq!(cfg.train_cutoff_year, 2020);
    }
}
