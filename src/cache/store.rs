//! Cache Store Module
//!
//! SQLite-backed storage of reference table codes keyed by period.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::cache::CacheEntry;
use crate::error::{ReferenceError, Result};

/// Schema for the reference table cache.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS fipe_tables (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    codigo INTEGER NOT NULL,
    mes TEXT NOT NULL
);
"#;

/// One entry per period. Only created when existing rows already satisfy it.
const UNIQUE_PERIOD_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_fipe_tables_mes ON fipe_tables(mes)";

/// Counts periods stored more than once.
const DUPLICATE_PERIODS: &str = r#"
SELECT COUNT(*) FROM (
    SELECT mes FROM fipe_tables GROUP BY mes HAVING COUNT(*) > 1
)
"#;

// == Cache Store ==
/// Persistent period -> code store.
///
/// The connection is opened once and shared by every clone; blocking SQLite
/// calls run on the blocking thread pool.
#[derive(Clone)]
pub struct CacheStore {
    conn: Arc<Mutex<Connection>>,
}

impl CacheStore {
    // == Constructors ==
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(ReferenceError::StorageInit)?;
        Self::initialize(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(ReferenceError::StorageInit)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(ReferenceError::StorageInit)?;

        // Databases written without the index may repeat a period. Rows are
        // never deleted, so such files keep working without the index.
        let duplicates: i64 = conn
            .query_row(DUPLICATE_PERIODS, [], |row| row.get(0))
            .map_err(ReferenceError::StorageInit)?;
        if duplicates == 0 {
            conn.execute(UNIQUE_PERIOD_INDEX, [])
                .map_err(ReferenceError::StorageInit)?;
        } else {
            warn!(
                "{} periods are stored more than once, skipping unique index",
                duplicates
            );
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| ReferenceError::Internal(format!("Lock poisoned: {}", e)))?;
            op(&guard)
        })
        .await
        .map_err(|e| ReferenceError::Internal(format!("Storage task failed: {}", e)))?
    }

    // == Lookup ==
    /// Returns the code cached for `period`, or `None` when absent.
    pub async fn lookup(&self, period: &str) -> Result<Option<u32>> {
        let period = period.to_string();
        self.run(move |conn| {
            conn.query_row(
                "SELECT codigo FROM fipe_tables WHERE mes = ?1",
                params![period],
                |row| row.get(0),
            )
            .optional()
            .map_err(ReferenceError::StorageQuery)
        })
        .await
    }

    // == Insert ==
    /// Stores `code` for `period`.
    ///
    /// Returns `false` when the period already had an entry, which is left
    /// untouched.
    pub async fn insert(&self, period: &str, code: u32) -> Result<bool> {
        let period = period.to_string();
        self.run(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO fipe_tables (codigo, mes) VALUES (?1, ?2)",
                params![code, period],
            )
            .map(|changed| changed > 0)
            .map_err(ReferenceError::StorageWrite)
        })
        .await
    }

    // == Entries ==
    /// Returns every stored entry in insertion order.
    pub async fn entries(&self) -> Result<Vec<CacheEntry>> {
        self.run(|conn| {
            let mut stmt = conn
                .prepare("SELECT mes, codigo FROM fipe_tables ORDER BY id")
                .map_err(ReferenceError::StorageQuery)?;
            let rows = stmt
                .query_map([], |row| Ok(CacheEntry::new(row.get::<_, String>(0)?, row.get(1)?)))
                .map_err(ReferenceError::StorageQuery)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(ReferenceError::StorageQuery)
        })
        .await
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub async fn len(&self) -> Result<usize> {
        self.run(|conn| {
            conn.query_row("SELECT COUNT(*) FROM fipe_tables", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .map_err(ReferenceError::StorageQuery)
        })
        .await
    }

    /// Returns true if nothing has been cached yet.
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore").finish_non_exhaustive()
    }
}
