use std::path::{Path, PathBuf};

use examprep_store::adapter::outbound::sqlite::SqliteConnector;
use tempfile::TempDir;

/// Temporary SQLite database file, removed with its directory on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("{name}.db"));
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connector(&self) -> SqliteConnector {
        SqliteConnector::new(&self.path)
    }
}
