//! Persistence manager service.
//!
//! Owns the single live connection to the local store. The composition root
//! constructs one manager and shares it (usually as `Arc<PersistenceManager>`);
//! every collaborator then observes the same connection.
//!
//! Lifecycle:
//!
//! ```text
//!   new() ──▶ [closed] ──initialize()──▶ [open] ──close()──▶ [closed]
//!                 ▲  │ open/migrate fails   │ initialize() is a no-op
//!                 └──┘ (handle stays None)  └──────────────┘
//! ```
//!
//! Store calls are synchronous; the async methods only give callers a
//! completion to await. No lock is held across an await point.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::adapter::outbound::sqlite::fixture::{self, FixtureSet};
use crate::adapter::outbound::sqlite::migration::{self, Migration, MIGRATIONS};
use crate::adapter::outbound::sqlite::SqliteConnector;
use crate::error::{Error, Result};
use crate::infrastructure::config::DatabaseConfig;
use crate::port::outbound::catalog::TableCatalog;
use crate::port::outbound::database::{Connector, StoreConnection};

/// Enables foreign-key enforcement, which SQLite leaves off per connection.
pub const FOREIGN_KEYS_PRAGMA: &str = "PRAGMA foreign_keys = ON";

/// Migration state of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    /// Store identity (file name or `:memory:`).
    pub store: String,
    /// Whether this manager holds a live connection.
    pub initialized: bool,
    /// Versions recorded in the tracking table, in application order.
    pub applied: Vec<String>,
    /// Known versions not yet applied.
    pub pending: Vec<&'static str>,
}

/// Single owner of the store connection.
pub struct PersistenceManager<C: Connector = SqliteConnector> {
    connector: C,
    migrations: &'static [Migration],
    /// Set only by `initialize`, cleared only by `close`.
    connection: Mutex<Option<C::Connection>>,
}

impl PersistenceManager<SqliteConnector> {
    /// Manager for the store described by `config`.
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(SqliteConnector::from_config(config))
    }

    /// Manager over a private in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(SqliteConnector::in_memory())
    }
}

impl<C: Connector> PersistenceManager<C> {
    /// Create an uninitialized manager applying the built-in migrations.
    pub fn new(connector: C) -> Self {
        Self::with_migrations(connector, MIGRATIONS)
    }

    /// Create an uninitialized manager with a custom migration list.
    pub fn with_migrations(connector: C, migrations: &'static [Migration]) -> Self {
        Self {
            connector,
            migrations,
            connection: Mutex::new(None),
        }
    }

    /// Identity of the managed store.
    pub fn store_name(&self) -> &str {
        self.connector.store_name()
    }

    /// True while a live connection is held.
    pub fn is_initialized(&self) -> bool {
        self.connection.lock().is_some()
    }

    /// Open the store, enable foreign keys and apply pending migrations.
    ///
    /// Does nothing when a connection is already live. The handle is stored
    /// only after every step succeeds, so a failed call can simply be retried.
    ///
    /// # Errors
    /// Returns [`Error::Connection`] when the store cannot be opened and
    /// [`Error::Migration`] when a migration batch fails.
    pub async fn initialize(&self) -> Result<()> {
        let mut slot = self.connection.lock();
        if slot.is_some() {
            debug!(store = self.store_name(), "Already initialized");
            return Ok(());
        }

        let mut conn = self.connector.open()?;
        let applied = match self.prepare(&mut conn) {
            Ok(applied) => applied,
            Err(e) => {
                if let Err(close_err) = conn.close() {
                    warn!(error = %close_err, "Failed to release connection after init error");
                }
                return Err(e);
            }
        };

        *slot = Some(conn);
        info!(
            store = self.store_name(),
            applied = applied.len(),
            "Persistence initialized"
        );
        Ok(())
    }

    fn prepare(&self, conn: &mut C::Connection) -> Result<Vec<&'static str>> {
        conn.batch_execute(FOREIGN_KEYS_PRAGMA)?;
        migration::run_migrations(conn, self.migrations)
    }

    /// Borrow the live connection.
    ///
    /// The guard holds the manager's lock; drop it before awaiting.
    ///
    /// # Errors
    /// Returns [`Error::NotInitialized`] before a successful `initialize`.
    pub fn connection(&self) -> Result<MappedMutexGuard<'_, C::Connection>> {
        MutexGuard::try_map(self.connection.lock(), Option::as_mut)
            .map_err(|_| Error::NotInitialized)
    }

    /// Release the connection. Later calls are no-ops.
    ///
    /// # Errors
    /// Propagates a failure of the underlying release; the handle is cleared
    /// regardless.
    pub async fn close(&self) -> Result<()> {
        let conn = self.connection.lock().take();
        match conn {
            Some(conn) => {
                conn.close()?;
                info!(store = self.store_name(), "Persistence closed");
            }
            None => debug!(store = self.store_name(), "Already closed"),
        }
        Ok(())
    }

    /// Whether a table with this exact name exists.
    ///
    /// # Errors
    /// Returns [`Error::NotInitialized`] before `initialize`.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        self.connection()?.table_exists(name)
    }

    /// All user table names, ascending.
    ///
    /// # Errors
    /// Returns [`Error::NotInitialized`] before `initialize`.
    pub async fn all_tables(&self) -> Result<Vec<String>> {
        self.connection()?.list_tables()
    }

    /// Upsert the built-in CBAP fixtures.
    ///
    /// # Errors
    /// Engine errors are returned as raised.
    pub async fn load_fixtures(&self) -> Result<()> {
        self.load_fixture_set(&FixtureSet::cbap()).await
    }

    /// Upsert an arbitrary fixture set.
    ///
    /// # Errors
    /// Engine errors are returned as raised.
    pub async fn load_fixture_set(&self, fixtures: &FixtureSet) -> Result<()> {
        let mut conn = self.connection()?;
        fixture::load_fixtures(&mut *conn, fixtures)
    }

    /// Applied and pending migration versions.
    ///
    /// Without a live connection, a temporary one is opened for inspection
    /// only: no pragma, no migrations, and it is released before returning.
    /// A store that does not exist yet is reported as fully pending and is
    /// not created.
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened or read.
    pub async fn status(&self) -> Result<StoreStatus> {
        let (initialized, applied) = match self.connection() {
            Ok(mut conn) => (true, migration::applied_versions(&mut *conn)?),
            Err(_) if !self.connector.store_exists() => {
                debug!(store = self.store_name(), "Store does not exist yet");
                (false, Vec::new())
            }
            Err(_) => {
                let mut conn = self.connector.open()?;
                let applied = migration::applied_versions(&mut conn);
                conn.close()?;
                (false, applied?)
            }
        };

        let pending = migration::unapplied(self.migrations, &applied);

        Ok(StoreStatus {
            store: self.store_name().to_string(),
            initialized,
            applied,
            pending,
        })
    }
}
