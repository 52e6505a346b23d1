//! Configuration System
//!
//! Loads run settings and the starting territories from court.toml.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::components::{ProsperitySignals, Territory};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "court.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
    pub territories: Vec<TerritoryConfig>,
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub ticks: u64,
    pub seed: u64,
    pub snapshot_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            seed: 42,
            snapshot_interval: 120,
        }
    }
}

/// Where results are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub events_path: PathBuf,
    pub snapshot_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from("output/events.jsonl"),
            snapshot_dir: PathBuf::from("output/snapshots"),
        }
    }
}

/// A starting territory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryConfig {
    pub id: String,
    pub name: String,
    pub wealth: i64,
    pub food: i64,
    pub military: i64,
    pub technology: i64,
    pub happiness: i64,
    pub population: u64,
    pub signals: Option<ProsperitySignals>,
}

impl Default for TerritoryConfig {
    fn default() -> Self {
        let base = Territory::new("", "");
        Self {
            id: base.id,
            name: base.name,
            wealth: base.wealth,
            food: base.food,
            military: base.military,
            technology: base.technology,
            happiness: base.happiness,
            population: base.population,
            signals: None,
        }
    }
}

impl TerritoryConfig {
    pub fn to_territory(&self) -> Territory {
        let name = if self.name.is_empty() { &self.id } else { &self.name };
        let mut territory = Territory::new(&self.id, name)
            .with_stats(self.wealth, self.food, self.military, self.technology)
            .with_population(self.population);
        territory.happiness = self.happiness;
        territory.signals = self.signals.clone();
        territory
    }
}

impl CourtConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load court config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Configured territories, or a pair of sample realms when none are given
    pub fn starting_territories(&self) -> Vec<Territory> {
        if self.territories.is_empty() {
            return vec![
                Territory::new("kingsreach", "Kingsreach")
                    .with_population(8000)
                    .with_signals(3, 20.0),
                Territory::new("westmarch", "Westmarch").with_population(2500),
            ];
        }
        self.territories.iter().map(TerritoryConfig::to_territory).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CourtConfig::default();
        assert_eq!(config.simulation.ticks, 600);
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.starting_territories().len(), 2);
    }

    #[test]
    fn test_partial_file() {
        let config = CourtConfig::from_toml(
            r#"
            [simulation]
            seed = 7

            [[territories]]
            id = "eastfold"
            population = 9000

            [territories.signals]
            prosperity_tier = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.ticks, 600);
        let territories = config.starting_territories();
        assert_eq!(territories.len(), 1);
        assert_eq!(territories[0].name, "eastfold");
        assert_eq!(territories[0].population, 9000);
        assert_eq!(territories[0].wealth, 100);
        assert_eq!(territories[0].prosperity_tier(), 4);
        assert_eq!(territories[0].decadence_level(), 0.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = CourtConfig::load_or_default("definitely/not/here.toml");
        assert_eq!(config, CourtConfig::default());
        assert!(matches!(
            CourtConfig::load("definitely/not/here.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            CourtConfig::from_toml("[simulation\nticks = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
