//! SQLite-backed storage for serialized link collections.
//!
//! One row per storage key; the value column holds the JSON text exactly as
//! the client sent it, with no schema interpretation on the server side.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Key-value store for collection blobs.
#[derive(Clone)]
pub struct LinkStore {
    conn: Arc<Mutex<Connection>>,
}

impl LinkStore {
    /// Open (or create) the database at the given path.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory {}", parent.display())
            })?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .context("Failed to configure database")?;

        let store = LinkStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        info!("Link store ready at {}", db_path.display());
        Ok(store)
    }

    /// Open an in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let store = LinkStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.lock()?
            .execute_batch(
                r#"
                -- One serialized collection per storage key
                CREATE TABLE IF NOT EXISTS link_data (
                    id TEXT PRIMARY KEY,
                    data TEXT NOT NULL
                );
                "#,
            )
            .context("Failed to initialize schema")?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Database mutex poisoned"))
    }

    /// Fetch the stored JSON text for a key, or `None` when nothing was saved.
    pub fn get(&self, id: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let data = conn
            .query_row(
                "SELECT data FROM link_data WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query link data")?;
        Ok(data)
    }

    /// Insert or replace the stored JSON text for a key.
    pub fn put(&self, id: &str, data: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO link_data (id, data) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET data = excluded.data",
            params![id, data],
        )
        .context("Failed to store link data")?;
        debug!(id, bytes = data.len(), "stored link data");
        Ok(())
    }
}
