//! Catalog introspection port.

use crate::error::Result;

/// Read-only view of the store's table catalog.
pub trait TableCatalog {
    /// True when a table with exactly this name exists.
    fn table_exists(&mut self, name: &str) -> Result<bool>;

    /// Names of all user tables in ascending order, engine-internal tables excluded.
    fn list_tables(&mut self) -> Result<Vec<String>>;
}
