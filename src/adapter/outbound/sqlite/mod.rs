//! SQLite persistence adapters.
//!
//! Provides the Diesel-backed store connection, catalog introspection, the
//! schema migrations and development fixtures.

pub mod catalog;
pub mod connection;
pub mod fixture;
pub mod migration;
pub mod schema;

pub use connection::{SqliteConnector, SqliteStore, IN_MEMORY};
pub use fixture::{load_fixtures, FixtureSet};
pub use migration::{Migration, MigrationOutcome, MIGRATIONS};
