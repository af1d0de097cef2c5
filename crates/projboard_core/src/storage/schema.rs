//! On-disk layout of the SQLite key-value file.
//!
//! The file holds one `kv_items` table; its version lives in
//! `PRAGMA user_version`. Only the table is versioned, never the JSON
//! values stored in it.

use super::{StorageError, StorageResult};
use rusqlite::Connection;

/// Version written by this build once `kv_items` exists.
pub const SCHEMA_VERSION: u32 = 1;

const KV_ITEMS_SQL: &str = include_str!("kv_items.sql");

/// Creates `kv_items` on a fresh file; refuses files from newer builds.
pub(crate) fn ensure_schema(conn: &mut Connection) -> StorageResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if found > SCHEMA_VERSION {
        return Err(StorageError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_ITEMS_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}
