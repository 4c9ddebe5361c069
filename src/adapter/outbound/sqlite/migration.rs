//! Versioned schema migrations.
//!
//! [`MIGRATIONS`] is append-only: a released version is never edited or
//! reordered. Each version is recorded in the `migrations` tracking table
//! after its batch succeeds, and a recorded version is never run again.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::schema;
use crate::error::{Error, Result};
use crate::port::outbound::database::StoreConnection;

/// A named, one-time schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Unique version identifier, ordered lexically.
    pub version: &'static str,
    /// Full SQL batch. Must be safe to re-run after a partial failure.
    pub sql: &'static str,
}

/// Every known migration in application order.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: "001_initial",
    sql: schema::INITIAL,
}];

/// What [`run_migration`] did with a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    Applied,
    Skipped,
}

const IS_APPLIED_SQL: &str = "SELECT COUNT(*) AS value FROM migrations WHERE version = ?";
const RECORD_SQL: &str = "INSERT INTO migrations (version, applied_at) VALUES (?, ?)";
const APPLIED_VERSIONS_SQL: &str = "SELECT version AS value FROM migrations ORDER BY id";

/// Ensure the tracking table exists, then apply `migrations` in order.
///
/// Returns the versions applied by this call.
///
/// # Errors
/// Stops at the first failing migration; later versions are not attempted.
pub fn run_migrations<C: StoreConnection>(
    conn: &mut C,
    migrations: &[Migration],
) -> Result<Vec<&'static str>> {
    conn.batch_execute(schema::MIGRATIONS_TABLE)?;

    let mut applied = Vec::new();
    for migration in migrations {
        if run_migration(conn, migration)? == MigrationOutcome::Applied {
            applied.push(migration.version);
        }
    }
    Ok(applied)
}

/// Apply a single migration unless its version is already recorded.
///
/// The tracking row is inserted only after the batch succeeds, so a failed
/// version is retried on the next run.
///
/// # Errors
/// Returns [`Error::Migration`] when the batch fails.
pub fn run_migration<C: StoreConnection>(
    conn: &mut C,
    migration: &Migration,
) -> Result<MigrationOutcome> {
    if conn.query_count(IS_APPLIED_SQL, &[migration.version.into()])? > 0 {
        debug!(version = migration.version, "Migration already applied");
        return Ok(MigrationOutcome::Skipped);
    }

    if let Err(e) = conn.batch_execute(migration.sql) {
        warn!(version = migration.version, error = %e, "Migration failed");
        return Err(Error::migration(migration.version, e));
    }

    conn.execute(
        RECORD_SQL,
        &[
            migration.version.into(),
            Utc::now().timestamp_millis().into(),
        ],
    )?;

    info!(version = migration.version, "Applied migration");
    Ok(MigrationOutcome::Applied)
}

/// Versions recorded in the tracking table, in application order.
///
/// Empty when the tracking table does not exist yet.
pub fn applied_versions<C: StoreConnection>(conn: &mut C) -> Result<Vec<String>> {
    if !conn.table_exists("migrations")? {
        return Ok(Vec::new());
    }
    conn.query_text(APPLIED_VERSIONS_SQL, &[])
}

/// Known versions not yet recorded as applied.
pub fn pending_versions<C: StoreConnection>(
    conn: &mut C,
    migrations: &[Migration],
) -> Result<Vec<&'static str>> {
    let applied = applied_versions(conn)?;
    Ok(unapplied(migrations, &applied))
}

/// Versions of `migrations` missing from `applied`, in list order.
#[must_use]
pub fn unapplied(migrations: &[Migration], applied: &[String]) -> Vec<&'static str> {
    migrations
        .iter()
        .map(|m| m.version)
        .filter(|v| !applied.iter().any(|a| a.as_str() == *v))
        .collect()
}
