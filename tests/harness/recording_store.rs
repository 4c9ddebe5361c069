use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use examprep_store::adapter::outbound::sqlite::{SqliteConnector, SqliteStore};
use examprep_store::error::{Error, Result};
use examprep_store::port::{Connector, SqlValue, StoreConnection, TableCatalog};
use parking_lot::Mutex;

/// Shared counters and fault switches for a [`RecordingConnector`].
#[derive(Default)]
pub struct Recorder {
    opens: AtomicUsize,
    closes: AtomicUsize,
    statements: Mutex<Vec<String>>,
    fail_open: AtomicBool,
    fail_batch_containing: Mutex<Option<String>>,
}

impl Recorder {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Every statement issued through a recorded connection, in order.
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().clone()
    }

    pub fn statement_count(&self) -> usize {
        self.statements.lock().len()
    }

    pub fn fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::SeqCst);
    }

    /// Make `batch_execute` fail for any batch containing `needle`.
    pub fn fail_batch_containing(&self, needle: Option<&str>) {
        *self.fail_batch_containing.lock() = needle.map(str::to_string);
    }

    fn record(&self, sql: &str) {
        self.statements.lock().push(sql.trim().to_string());
    }
}

/// Wraps the real SQLite connector and records what flows through it.
pub struct RecordingConnector {
    inner: SqliteConnector,
    recorder: Arc<Recorder>,
}

impl RecordingConnector {
    pub fn new(inner: SqliteConnector) -> (Self, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (
            Self {
                inner,
                recorder: Arc::clone(&recorder),
            },
            recorder,
        )
    }

    pub fn in_memory() -> (Self, Arc<Recorder>) {
        Self::new(SqliteConnector::in_memory())
    }
}

impl Connector for RecordingConnector {
    type Connection = RecordingConnection;

    fn store_name(&self) -> &str {
        self.inner.store_name()
    }

    fn store_exists(&self) -> bool {
        self.inner.store_exists()
    }

    fn open(&self) -> Result<RecordingConnection> {
        self.recorder.opens.fetch_add(1, Ordering::SeqCst);
        if self.recorder.fail_open.load(Ordering::SeqCst) {
            return Err(Error::Connection("injected open failure".into()));
        }
        Ok(RecordingConnection {
            inner: self.inner.open()?,
            recorder: Arc::clone(&self.recorder),
        })
    }
}

pub struct RecordingConnection {
    inner: SqliteStore,
    recorder: Arc<Recorder>,
}

impl TableCatalog for RecordingConnection {
    fn table_exists(&mut self, name: &str) -> Result<bool> {
        self.recorder.record(&format!("catalog: table_exists {name}"));
        self.inner.table_exists(name)
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        self.recorder.record("catalog: list_tables");
        self.inner.list_tables()
    }
}

impl StoreConnection for RecordingConnection {
    fn batch_execute(&mut self, sql: &str) -> Result<()> {
        self.recorder.record(sql);
        let injected = self
            .recorder
            .fail_batch_containing
            .lock()
            .as_deref()
            .is_some_and(|needle| sql.contains(needle));
        if injected {
            return Err(Error::Database("injected batch failure".into()));
        }
        self.inner.batch_execute(sql)
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        self.recorder.record(sql);
        self.inner.execute(sql, params)
    }

    fn query_text(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<String>> {
        self.recorder.record(sql);
        self.inner.query_text(sql, params)
    }

    fn query_count(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64> {
        self.recorder.record(sql);
        self.inner.query_count(sql, params)
    }

    fn close(self) -> Result<()> {
        self.recorder.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close()
    }
}
