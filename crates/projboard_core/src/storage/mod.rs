//! Key-value storage backends.
//!
//! # Responsibility
//! - Model the local key-value storage the board persists into.
//! - Keep backend transport details out of the store.
//!
//! # Invariants
//! - `set_item` fully overwrites any previous value under the key.
//! - Backends report failures as `StorageError`; they never panic.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
mod schema;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use schema::SCHEMA_VERSION;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// Storage is disabled or otherwise not reachable.
    Unavailable(String),
    /// The write would exceed the backend's byte quota.
    QuotaExceeded { limit: usize, requested: usize },
    /// The SQLite file was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded { limit, requested } => write!(
                f,
                "storage quota exceeded: {requested} bytes requested, limit is {limit}"
            ),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "board file uses storage schema {found}; this build reads up to {supported}"
            ),
            Self::Sqlite(err) => write!(f, "sqlite storage error: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value storage with whole-value overwrite semantics.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
