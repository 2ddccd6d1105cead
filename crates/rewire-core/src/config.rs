//! Simulation configuration
//!
//! Loaded from a TOML file (`rewire.toml` by default). Every section is
//! optional; missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use rewire_strategies::{registry, Game};

/// Default config file name looked up by the binary
pub const DEFAULT_CONFIG_FILE: &str = "rewire.toml";

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Round and turn counts, seed
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Edge threshold and rebuild settings
    #[serde(default)]
    pub network: NetworkConfig,
    /// Population size and strategy assignment
    #[serde(default)]
    pub population: PopulationConfig,
    /// Payoff matrix
    #[serde(default)]
    pub game: Game,
    /// Report and graph export settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_rounds: u32,
    /// Turns per match
    pub num_turns: u32,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_rounds: 20,
            num_turns: 20,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Edges at or below this weight are severed after each round
    pub threshold: i64,
    /// Probability that an unconnected pair reconnects after each round
    pub rebuild_chance: f64,
    /// Weight of every edge in the initial complete graph
    pub init_weight: i64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            threshold: 0,
            rebuild_chance: 0.05,
            init_weight: 100,
        }
    }
}

impl NetworkConfig {
    /// Weight given to rebuilt edges (floor of half the initial weight)
    pub fn rebuild_weight(&self) -> i64 {
        self.init_weight.div_euclid(2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Slots filled by random draws from `pool`
    pub player_count: usize,
    /// Draw strategies from the pool; otherwise use `roster` as given
    pub random_players: bool,
    pub use_moran_process: bool,
    /// Fixed lineup used when `random_players` is off
    pub roster: Vec<String>,
    /// Strategy names for random assignment (empty = the default pool)
    pub pool: Vec<String>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        let roster = [
            "Cooperator", "Defector", "Defector", "Cooperator", "Cooperator",
            "Defector", "Cooperator", "Cooperator", "Defector", "Defector",
        ];
        Self {
            player_count: 10,
            random_players: true,
            use_moran_process: true,
            roster: roster.iter().map(|s| s.to_string()).collect(),
            pool: Vec::new(),
        }
    }
}

impl PopulationConfig {
    /// Strategy names available for random assignment
    pub fn pool_names(&self) -> Vec<String> {
        if self.pool.is_empty() {
            registry::default_pool_names().into_iter().map(String::from).collect()
        } else {
            self.pool.clone()
        }
    }

    /// Number of slots the population will have
    pub fn size(&self) -> usize {
        if self.random_players {
            self.player_count
        } else {
            self.roster.len()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Append a JSON line per round to `rounds.jsonl`
    pub write_reports: bool,
    /// Write the final graph as `graph.json` and `graph.dot`
    pub export_graph: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            write_reports: true,
            export_graph: true,
        }
    }
}

impl SimConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every constraint the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.num_rounds == 0 {
            return Err(ConfigError::Invalid("num_rounds must be at least 1".into()));
        }
        if self.simulation.num_turns == 0 {
            return Err(ConfigError::Invalid("num_turns must be at least 1".into()));
        }

        let chance = self.network.rebuild_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::Invalid(format!(
                "rebuild_chance must be within [0, 1], got {}",
                chance
            )));
        }

        let population = &self.population;
        if population.random_players {
            if population.player_count < 2 {
                return Err(ConfigError::Invalid(format!(
                    "player_count must be at least 2, got {}",
                    population.player_count
                )));
            }
            let pool = population.pool_names();
            if pool.is_empty() {
                return Err(ConfigError::Invalid("strategy pool is empty".into()));
            }
            check_names(&pool)?;
        } else {
            if population.roster.len() < 2 {
                return Err(ConfigError::Invalid(format!(
                    "roster needs at least 2 strategies, got {}",
                    population.roster.len()
                )));
            }
            check_names(&population.roster)?;
        }

        Ok(())
    }
}

fn check_names(names: &[String]) -> Result<(), ConfigError> {
    match names.iter().find(|name| !registry::contains(name)) {
        Some(name) => Err(ConfigError::UnknownStrategy(name.clone())),
        None => Ok(()),
    }
}

/// Commented default configuration written by `--write-default-config`.
pub fn default_config_toml() -> Result<String, ConfigError> {
    let body = SimConfig::default().to_toml()?;
    Ok(format!(
        "# Rewiring simulation configuration\n\
         # Strategy names: {}\n\n{}",
        registry::names().join(", "),
        body
    ))
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}
