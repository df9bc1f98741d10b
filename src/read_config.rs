// Module de lecture de la configuration du simulateur

use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use crate::core::{EngineOptions, IdPolicy};
use crate::dijkstra::SolverStrategy;
use crate::error::{AppError, Result};
use crate::types::Cost;

/// Fichier de configuration lu par défaut
pub const DEFAULT_CONFIG_PATH: &str = "simulator.toml";

/// Variable d'environnement permettant de choisir un autre fichier
pub const CONFIG_ENV_VAR: &str = "ROUTING_SIM_CONFIG";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Dossier des réseaux sauvegardés
    pub data_dir: PathBuf,
    pub min_cost: Cost,
    pub max_cost: Cost,
    /// Graine du générateur aléatoire ; absente = non reproductible
    pub seed: Option<u64>,
    pub solver: SolverStrategy,
    pub id_policy: IdPolicy,
    pub log_level: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            data_dir: PathBuf::from("data"),
            min_cost: 1,
            max_cost: 20,
            seed: None,
            solver: SolverStrategy::default(),
            id_policy: IdPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SimulatorConfig {
    pub fn cost_range(&self) -> RangeInclusive<Cost> {
        self.min_cost..=self.max_cost
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            strategy: self.solver,
            id_policy: self.id_policy,
        }
    }

    fn validate(self) -> Result<Self> {
        if self.min_cost > self.max_cost {
            return Err(AppError::ConfigError(format!(
                "min_cost ({}) must not exceed max_cost ({})",
                self.min_cost, self.max_cost
            )));
        }
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<SimulatorConfig> {
    let config: SimulatorConfig = toml::from_str(content)?;
    config.validate()
}

/// Lit la configuration depuis `path`
pub fn read_config(path: &Path) -> Result<SimulatorConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e)))?;
    let config = parse_config(&content)
        .map_err(|e| match e {
            AppError::ConfigError(msg) => AppError::ConfigError(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;

    log::debug!("Config: {:?}", config);
    Ok(config)
}

/// Lit la configuration désignée par `ROUTING_SIM_CONFIG` ou `simulator.toml`.
/// Un fichier absent donne la configuration par défaut.
pub fn read_simulator_config() -> Result<SimulatorConfig> {
    let path = std::env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    if !path.exists() {
        return Ok(SimulatorConfig::default());
    }
    read_config(&path)
}
