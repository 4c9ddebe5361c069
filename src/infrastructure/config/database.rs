//! Database location and connection settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Environment variable overriding the resolved database path.
pub const DATABASE_ENV: &str = "EXAMPREP_DATABASE";

/// Fixed store identifier used when none is configured.
pub const DEFAULT_DATABASE_NAME: &str = "examprep.db";

const IN_MEMORY: &str = ":memory:";

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file name, or `:memory:`.
    pub name: String,
    /// Directory holding the database file. Relative to the working directory.
    pub directory: Option<PathBuf>,
    /// `PRAGMA busy_timeout` applied to every connection.
    pub busy_timeout_ms: u64,
    /// Seed development fixtures after `init`.
    pub load_fixtures: bool,
    #[serde(skip)]
    path_override: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DATABASE_NAME.into(),
            directory: None,
            busy_timeout_ms: 5000,
            load_fixtures: false,
            path_override: None,
        }
    }
}

impl DatabaseConfig {
    /// In-memory store, mostly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            name: IN_MEMORY.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path_override.is_none() && self.name == IN_MEMORY
    }

    /// Resolved database file path.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        if let Some(path) = &self.path_override {
            return path.clone();
        }
        match &self.directory {
            Some(dir) => dir.join(&self.name),
            None => PathBuf::from(&self.name),
        }
    }

    /// Replace the resolved path, as `EXAMPREP_DATABASE` does.
    pub fn override_path(&mut self, path: impl Into<PathBuf>) {
        self.path_override = Some(path.into());
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.name",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "database.name",
                reason: "must be a file name; use database.directory for the location".to_string(),
            }
            .into());
        }
        if self.name == IN_MEMORY && self.directory.is_some() {
            return Err(ConfigError::InvalidValue {
                field: "database.directory",
                reason: "cannot be combined with an in-memory database".to_string(),
            }
            .into());
        }
        if self.busy_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.busy_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
