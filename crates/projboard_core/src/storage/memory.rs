//! Volatile `HashMap` backend.
//!
//! Can simulate disabled storage and quota limits so the store's fallback
//! paths are reachable without a real browser-like backend.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails, like storage disabled by the host.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// A backend that rejects writes whose stored size would exceed `bytes`.
    ///
    /// Size is counted as key length plus value length over all items.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota_bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Pre-populates one item, bypassing quota checks.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    /// Direct read for assertions; ignores availability.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    fn ensure_available(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "memory backend is disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_available()?;
        if let Some(limit) = self.quota_bytes {
            let requested = self.used_bytes_without(key) + key.len() + value.len();
            if requested > limit {
                return Err(StorageError::QuotaExceeded { limit, requested });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.ensure_available()?;
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn set_then_get_overwrites() {
        let mut store = MemoryKeyValueStore::new();
        store.set_item("k", "one").unwrap();
        store.set_item("k", "two").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("two"));
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn unavailable_backend_fails_every_call() {
        let mut store = MemoryKeyValueStore::unavailable();
        assert!(matches!(
            store.get_item("k"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            store.set_item("k", "v"),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let mut store = MemoryKeyValueStore::with_quota(8);
        store.set_item("k", "1234").unwrap();
        let err = store.set_item("k", "123456789").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                limit: 8,
                requested: 10
            }
        ));
        assert_eq!(store.peek("k"), Some("1234"));
    }
}
