//! Catalog introspection over `sqlite_master`.

use crate::adapter::outbound::sqlite::connection::SqliteStore;
use crate::error::Result;
use crate::port::outbound::catalog::TableCatalog;
use crate::port::outbound::database::StoreConnection;

const TABLE_EXISTS_SQL: &str =
    "SELECT name AS value FROM sqlite_master WHERE type = 'table' AND name = ?";

// Literal prefix match: LIKE would read `_` as a wildcard.
const LIST_TABLES_SQL: &str = "SELECT name AS value FROM sqlite_master \
     WHERE type = 'table' AND substr(name, 1, 7) <> 'sqlite_' ORDER BY name";

impl TableCatalog for SqliteStore {
    fn table_exists(&mut self, name: &str) -> Result<bool> {
        Ok(!self.query_text(TABLE_EXISTS_SQL, &[name.into()])?.is_empty())
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        self.query_text(LIST_TABLES_SQL, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::connection::SqliteConnector;
    use crate::port::outbound::database::Connector;

    #[test]
    fn lists_user_tables_sorted() {
        let mut store = SqliteConnector::in_memory().open().unwrap();
        store
            .batch_execute(
                "CREATE TABLE zeta (id INTEGER PRIMARY KEY AUTOINCREMENT);
                 CREATE TABLE alpha (id INTEGER);
                 CREATE TABLE Mid (id INTEGER);
                 INSERT INTO zeta DEFAULT VALUES;",
            )
            .unwrap();

        // AUTOINCREMENT materialises sqlite_sequence, which must stay hidden.
        assert!(store.table_exists("sqlite_sequence").unwrap());
        assert_eq!(store.list_tables().unwrap(), vec!["Mid", "alpha", "zeta"]);
    }

    #[test]
    fn lookalike_names_are_listed() {
        let mut store = SqliteConnector::in_memory().open().unwrap();
        store
            .batch_execute(
                "CREATE TABLE sqliteXnotes (id INTEGER);
                 CREATE TABLE sqlite1 (id INTEGER);",
            )
            .unwrap();

        assert!(store.table_exists("sqliteXnotes").unwrap());
        assert_eq!(store.list_tables().unwrap(), vec!["sqlite1", "sqliteXnotes"]);
    }

    #[test]
    fn table_exists_ignores_views_and_indexes() {
        let mut store = SqliteConnector::in_memory().open().unwrap();
        store
            .batch_execute(
                "CREATE TABLE t (id INTEGER);
                 CREATE INDEX idx_t ON t(id);
                 CREATE VIEW v AS SELECT id FROM t;",
            )
            .unwrap();

        assert!(store.table_exists("t").unwrap());
        assert!(!store.table_exists("idx_t").unwrap());
        assert!(!store.table_exists("v").unwrap());
        assert!(!store.table_exists("does_not_exist").unwrap());
    }
}
