//! Service configuration
//!
//! Settings come from an optional TOML file, then environment overrides:
//!
//! ```toml
//! environment = "development"
//! database_path = "boards.db"
//!
//! [simulation]
//! max_simulation_attempts = 1000
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `GAME_OF_LIFE_MAX_SIMULATION_ATTEMPTS` | `simulation.max_simulation_attempts` |
//! | `GAME_OF_LIFE_ENVIRONMENT` | `environment` |
//! | `GAME_OF_LIFE_DATABASE` | `database_path` |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Attempt budget for "run to final state" when nothing is configured
pub const DEFAULT_MAX_SIMULATION_ATTEMPTS: usize = 1000;

pub const ENV_MAX_SIMULATION_ATTEMPTS: &str = "GAME_OF_LIFE_MAX_SIMULATION_ATTEMPTS";
pub const ENV_ENVIRONMENT: &str = "GAME_OF_LIFE_ENVIRONMENT";
pub const ENV_DATABASE: &str = "GAME_OF_LIFE_DATABASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Limits applied by the bounded stepper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Transitions "run to final state" may apply before giving up
    pub max_simulation_attempts: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_simulation_attempts: DEFAULT_MAX_SIMULATION_ATTEMPTS,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_simulation_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_simulation_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Deployment context; decides how much error detail reaches callers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::Invalid(format!(
                "unknown environment '{}'",
                other
            ))),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub simulation: SimulationSettings,
    pub environment: Environment,
    /// SQLite database file; callers pick their own default when unset
    pub database_path: Option<PathBuf>,
}

impl ServiceConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(content)?;
        config.simulation.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, source);
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_toml_str(&content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            err
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Defaults with process environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (usually `std::env::var`)
    ///
    /// Blank values are ignored. Invalid values are rejected rather than
    /// silently replaced by defaults.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = value(ENV_MAX_SIMULATION_ATTEMPTS) {
            self.simulation.max_simulation_attempts = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_MAX_SIMULATION_ATTEMPTS, raw
                ))
            })?;
        }
        if let Some(raw) = value(ENV_ENVIRONMENT) {
            self.environment = raw.parse()?;
        }
        if let Some(raw) = value(ENV_DATABASE) {
            self.database_path = Some(PathBuf::from(raw));
        }

        self.simulation.validate()
    }
}
