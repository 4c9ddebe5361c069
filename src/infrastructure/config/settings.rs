//! Application configuration loading and validation.
//!
//! Configuration is read from a TOML file; every section is optional.
//! `EXAMPREP_DATABASE` overrides the resolved database path.
//!
//! ```toml
//! [database]
//! name = "examprep.db"
//! directory = "data"
//! busy_timeout_ms = 5000
//! load_fixtures = false
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use std::path::Path;

use serde::Deserialize;

use super::database::{DatabaseConfig, DATABASE_ENV};
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store location and connection settings.
    pub database: DatabaseConfig,

    /// Logging and tracing configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse_toml(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults.
    ///
    /// # Errors
    /// See [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.trim().is_empty() {
                self.database.override_path(path);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.database.validate()?;
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize the tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
