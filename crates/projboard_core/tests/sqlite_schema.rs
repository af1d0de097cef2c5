use projboard_core::{KeyValueStore, SqliteKeyValueStore, StorageError, SCHEMA_VERSION};
use rusqlite::Connection;

#[test]
fn fresh_file_gets_kv_items_at_current_version() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    let conn = store.connection();

    assert_eq!(user_version(conn), SCHEMA_VERSION);
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_items';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn reopening_keeps_stored_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    let mut first = SqliteKeyValueStore::open(&path).unwrap();
    first.set_item("k", "v").unwrap();
    drop(first);

    let second = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(user_version(second.connection()), SCHEMA_VERSION);
    assert_eq!(second.get_item("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match SqliteKeyValueStore::open(&path) {
        Err(StorageError::SchemaTooNew { found, supported }) => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema should be refused"),
    }
}

#[test]
fn unopenable_path_reports_sqlite_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("board.sqlite3");

    assert!(matches!(
        SqliteKeyValueStore::open(&path),
        Err(StorageError::Sqlite(_))
    ));
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
