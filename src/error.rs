use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    /// A connection-dependent operation ran before `initialize` succeeded.
    #[error("database not initialized; call initialize() first")]
    NotInitialized,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("migration {version} failed: {source}")]
    Migration {
        version: String,
        #[source]
        source: Box<Error>,
    },

    #[error("database error: {0}")]
    Database(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a failure raised while applying the given migration version.
    pub(crate) fn migration(version: &str, source: Error) -> Self {
        Error::Migration {
            version: version.to_string(),
            source: Box::new(source),
        }
    }
}
