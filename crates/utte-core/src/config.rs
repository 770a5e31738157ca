//! Configuration loading and typed config structures for the UTTE Universe.
//!
//! The canonical configuration lives in `utte-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every section is optional; a missing file yields the defaults.

use std::path::Path;

use serde::Deserialize;
use utte_agents::AgentConfig;
use utte_world::{SeedConfig, SeedError};

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "utte-config.yaml";

/// Environment variable that overrides the configuration file path.
pub const CONFIG_PATH_ENV: &str = "UTTE_CONFIG";

/// Environment variable that overrides `server.port`.
pub const PORT_ENV: &str = "UTTE_PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of its allowed domain.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl From<SeedError> for ConfigError {
    fn from(err: SeedError) -> Self {
        Self::Invalid {
            reason: err.to_string(),
        }
    }
}

/// Top-level universe configuration.
///
/// Mirrors the structure of `utte-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UniverseConfig {
    /// Tick timing and randomness.
    #[serde(default)]
    pub world: WorldConfig,

    /// Initial universe generation.
    #[serde(default)]
    pub seed: SeedConfig,

    /// NPC behaviour.
    #[serde(default)]
    pub agents: AgentConfig,

    /// Observer server binding.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl UniverseConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The environment is not consulted; see [`UniverseConfig::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `UTTE_CONFIG` or [`DEFAULT_CONFIG_PATH`], then apply
    /// environment overrides such as `UTTE_PORT`.
    ///
    /// A missing file is not an error: the defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// [`UniverseConfig::load`] with an explicit environment `lookup`.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = lookup(CONFIG_PATH_ENV).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
        let path = Path::new(&path);
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yml::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// An unparsable port value is ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup(PORT_ENV).and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("world.tick_interval_ms must be positive"),
            });
        }
        self.seed.validate()?;
        Ok(())
    }
}

/// Tick timing and randomness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Random seed for a reproducible run. Seeded from the OS when unset.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            rng_seed: None,
        }
    }
}

/// Observer server binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Output format (`pretty` or `json`).
    #[serde(default)]
    pub format: LogFormat,
}

const fn default_tick_interval_ms() -> u64 {
    2000
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}
