//! Store access port.
//!
//! The persistence manager talks to the embedded engine only through these
//! traits, so the SQLite binding can be swapped (or wrapped in tests) without
//! touching callers.

use crate::error::Result;
use crate::port::outbound::catalog::TableCatalog;

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A single open connection to the embedded store.
///
/// Implementations run every call synchronously; the engine serializes
/// access itself.
pub trait StoreConnection: TableCatalog + Send {
    /// Execute one or more `;`-separated statements without bind parameters.
    fn batch_execute(&mut self, sql: &str) -> Result<()>;

    /// Execute a single statement, returning the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize>;

    /// Run a query whose single text column is aliased `value`.
    fn query_text(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<String>>;

    /// Run a query whose single integer column is aliased `value`.
    fn query_count(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64>;

    /// Release the underlying engine handle.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Opens connections to one configured store.
pub trait Connector: Send + Sync {
    type Connection: StoreConnection;

    /// Identity of the store (file name or `:memory:`).
    fn store_name(&self) -> &str;

    /// Whether the store already exists, checked without opening it.
    fn store_exists(&self) -> bool;

    /// Open a fresh connection.
    fn open(&self) -> Result<Self::Connection>;
}
