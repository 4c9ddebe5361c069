//! SQLite connection management using Diesel.
//!
//! [`SqliteConnector`] opens one [`SqliteStore`] per call; the persistence
//! manager keeps at most one of them alive.

use std::path::{Path, PathBuf};
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::infrastructure::config::DatabaseConfig;
use crate::port::outbound::database::{Connector, SqlValue, StoreConnection};

/// Store identity used for in-memory databases.
pub const IN_MEMORY: &str = ":memory:";

#[derive(QueryableByName)]
struct TextRow {
    #[diesel(sql_type = Text)]
    value: String,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    value: i64,
}

/// Opens SQLite connections for a single database file.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    name: String,
    url: String,
    busy_timeout: Option<Duration>,
}

impl SqliteConnector {
    /// Connector for a database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            url: path.display().to_string(),
            busy_timeout: None,
        }
    }

    /// Connector for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            name: IN_MEMORY.to_string(),
            url: IN_MEMORY.to_string(),
            busy_timeout: None,
        }
    }

    /// Build a connector from validated configuration.
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let connector = if config.is_in_memory() {
            Self::in_memory()
        } else {
            Self::new(config.path())
        };
        connector.with_busy_timeout(Duration::from_millis(config.busy_timeout_ms))
    }

    /// Apply `PRAGMA busy_timeout` to every opened connection.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = Some(timeout);
        self
    }

    /// Database URL handed to Diesel.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Connector for SqliteConnector {
    type Connection = SqliteStore;

    fn store_name(&self) -> &str {
        &self.name
    }

    fn store_exists(&self) -> bool {
        self.url == IN_MEMORY || Path::new(&self.url).exists()
    }

    fn open(&self) -> Result<SqliteStore> {
        let mut conn = SqliteConnection::establish(&self.url)
            .map_err(|e| Error::Connection(format!("{}: {e}", self.url)))?;

        if let Some(timeout) = self.busy_timeout {
            conn.batch_execute(&format!("PRAGMA busy_timeout = {}", timeout.as_millis()))
                .map_err(|e| Error::Database(e.to_string()))?;
        }

        info!(store = %self.name, "Opened SQLite store");
        Ok(SqliteStore {
            name: self.name.clone(),
            conn,
        })
    }
}

/// A live SQLite connection.
pub struct SqliteStore {
    name: String,
    conn: SqliteConnection,
}

impl SqliteStore {
    fn bind(sql: &str, params: &[SqlValue]) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
        params
            .iter()
            .fold(diesel::sql_query(sql).into_boxed::<Sqlite>(), |query, param| {
                match param {
                    SqlValue::Null => query.bind::<Nullable<Text>, _>(None::<String>),
                    SqlValue::Integer(v) => query.bind::<BigInt, _>(*v),
                    SqlValue::Real(v) => query.bind::<Double, _>(*v),
                    SqlValue::Text(v) => query.bind::<Text, _>(v.clone()),
                }
            })
    }
}

impl StoreConnection for SqliteStore {
    fn batch_execute(&mut self, sql: &str) -> Result<()> {
        self.conn
            .batch_execute(sql)
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        Self::bind(sql, params)
            .execute(&mut self.conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn query_text(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<String>> {
        let rows: Vec<TextRow> = Self::bind(sql, params)
            .load(&mut self.conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.value).collect())
    }

    fn query_count(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64> {
        let rows: Vec<CountRow> = Self::bind(sql, params)
            .load(&mut self.conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.first()
            .map(|r| r.value)
            .ok_or_else(|| Error::Database(format!("query returned no rows: {sql}")))
    }

    fn close(self) -> Result<()> {
        debug!(store = %self.name, "Releasing SQLite connection");
        drop(self.conn);
        Ok(())
    }
}
