//! SQLite-backed key-value storage.
//!
//! # Invariants
//! - Wrapped connections have `kv_items` at `SCHEMA_VERSION`.
//! - Writes are single-statement upserts, atomic at SQLite granularity.

use super::schema::ensure_schema;
use super::{KeyValueStore, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens a board file, creating the file and table when missing.
    ///
    /// Emits `storage_open` events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::connect("file", || Connection::open(path))
    }

    /// Volatile database, mostly for tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::connect("memory", Connection::open_in_memory)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn connect(
        mode: &'static str,
        opener: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StorageResult<Self> {
        let started_at = Instant::now();
        let opened = opener()
            .map_err(StorageError::from)
            .and_then(|mut conn| -> StorageResult<Connection> {
                conn.busy_timeout(BUSY_TIMEOUT)?;
                ensure_schema(&mut conn)?;
                Ok(conn)
            });

        match opened {
            Ok(conn) => {
                info!(
                    "event=storage_open module=storage status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=storage_open module=storage status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_items (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_items WHERE key = ?1;", [key])?;
        Ok(())
    }
}
