//! Canonical owner of the project collection.
//!
//! # Responsibility
//! - Hold the single in-memory project collection.
//! - Load it from and save it to a key-value backend as one JSON document.
//!
//! # Invariants
//! - `load` never fails: missing, corrupt or unreadable state falls back to
//!   the seed dataset. Missing or corrupt state is replaced by the seed
//!   right away.
//! - State that could not be read is never overwritten: after a failed read
//!   the session stays in memory until `load` or `reset` succeeds.
//! - A failed `save` never touches in-memory state; it only downgrades the
//!   persistence status until the next successful save.
//! - Log events carry counts and error causes only, never user text.

use crate::model::project::Project;
use crate::model::seed::seed_projects;
use crate::storage::{KeyValueStore, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key the whole collection is stored under.
pub const PROJECTS_STORAGE_KEY: &str = "smartTechProjects";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Serialize(serde_json::Error),
    /// Stored projects could not be read this session, so writing could
    /// destroy them.
    WritesSuspended,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize projects: {err}"),
            Self::WritesSuspended => f.write_str(
                "stored projects could not be read; saving is suspended for this session",
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::WritesSuspended => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Whether the last write reached the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersistenceStatus {
    #[default]
    Durable,
    /// Changes live in memory only for now; `reason` is the last failure.
    InMemoryOnly { reason: String },
}

impl PersistenceStatus {
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Durable)
    }
}

/// Where the collection came from on the last `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    SeedMissing,
    SeedCorrupt,
    SeedReadFailed,
}

pub struct ProjectStore<B: KeyValueStore> {
    backend: B,
    projects: Vec<Project>,
    status: PersistenceStatus,
    last_load: Option<LoadSource>,
}

impl<B: KeyValueStore> ProjectStore<B> {
    /// Creates an empty store. Call `load` to hydrate it.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            projects: Vec::new(),
            status: PersistenceStatus::Durable,
            last_load: None,
        }
    }

    /// Replaces the in-memory collection with the stored one.
    pub fn load(&mut self) -> &[Project] {
        let source = match self.backend.get_item(PROJECTS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Project>>(&raw) {
                Ok(projects) => {
                    self.projects = projects;
                    self.status = PersistenceStatus::Durable;
                    LoadSource::Stored
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=fallback reason=corrupt bytes={} error={err}",
                        raw.len()
                    );
                    LoadSource::SeedCorrupt
                }
            },
            Ok(None) => LoadSource::SeedMissing,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback reason=read_failed error={err}"
                );
                self.status = PersistenceStatus::InMemoryOnly {
                    reason: err.to_string(),
                };
                LoadSource::SeedReadFailed
            }
        };

        self.last_load = Some(source);
        if source != LoadSource::Stored {
            self.projects = seed_projects();
        }
        if matches!(source, LoadSource::SeedMissing | LoadSource::SeedCorrupt) {
            // Failure is recorded in `status`; startup continues regardless.
            let _ = self.save();
        }

        info!(
            "event=store_load module=store status=ok source={source:?} projects={}",
            self.projects.len()
        );
        &self.projects
    }

    /// Writes the whole collection under the fixed key.
    pub fn save(&mut self) -> StoreResult<()> {
        if self.last_load == Some(LoadSource::SeedReadFailed) {
            log::debug!("event=store_save module=store status=skipped reason=read_failed");
            return Err(StoreError::WritesSuspended);
        }
        match self.write_all() {
            Ok(bytes) => {
                if !self.status.is_durable() {
                    info!("event=store_save module=store status=recovered");
                }
                self.status = PersistenceStatus::Durable;
                log::debug!(
                    "event=store_save module=store status=ok projects={} bytes={bytes}",
                    self.projects.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=store_save module=store status=error mode=in_memory_only error={err}");
                self.status = PersistenceStatus::InMemoryOnly {
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Drops stored state and reloads, which yields fresh seed data.
    pub fn reset(&mut self) -> &[Project] {
        if let Err(err) = self.backend.remove_item(PROJECTS_STORAGE_KEY) {
            warn!("event=store_reset module=store status=error error={err}");
        }
        self.load()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub(crate) fn projects_mut(&mut self) -> &mut Vec<Project> {
        &mut self.projects
    }

    pub fn persistence_status(&self) -> &PersistenceStatus {
        &self.status
    }

    pub fn last_load(&self) -> Option<LoadSource> {
        self.last_load
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn write_all(&mut self) -> StoreResult<usize> {
        let serialized = serde_json::to_string(&self.projects)?;
        self.backend.set_item(PROJECTS_STORAGE_KEY, &serialized)?;
        Ok(serialized.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadSource, PersistenceStatus, ProjectStore, StoreError, PROJECTS_STORAGE_KEY};
    use crate::model::project::Project;
    use crate::model::seed::seed_projects;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn load_from_empty_backend_seeds_and_persists() {
        let mut store = ProjectStore::new(MemoryKeyValueStore::new());
        assert_eq!(store.load(), seed_projects().as_slice());
        assert_eq!(store.last_load(), Some(LoadSource::SeedMissing));

        let stored = store.backend().peek(PROJECTS_STORAGE_KEY).unwrap();
        let parsed: Vec<Project> = serde_json::from_str(stored).unwrap();
        assert_eq!(parsed, seed_projects());
    }

    #[test]
    fn corrupt_state_falls_back_to_seed_and_overwrites_it() {
        let backend = MemoryKeyValueStore::new().with_item(PROJECTS_STORAGE_KEY, "{not json");
        let mut store = ProjectStore::new(backend);
        assert_eq!(store.load().len(), 2);
        assert_eq!(store.last_load(), Some(LoadSource::SeedCorrupt));
        assert!(store
            .backend()
            .peek(PROJECTS_STORAGE_KEY)
            .unwrap()
            .starts_with('['));
    }

    #[test]
    fn stored_empty_collection_is_respected() {
        let backend = MemoryKeyValueStore::new().with_item(PROJECTS_STORAGE_KEY, "[]");
        let mut store = ProjectStore::new(backend);
        assert!(store.load().is_empty());
        assert_eq!(store.last_load(), Some(LoadSource::Stored));
    }

    #[test]
    fn save_failure_degrades_and_later_success_recovers() {
        let mut store = ProjectStore::new(MemoryKeyValueStore::new());
        store.load();

        store.backend_mut().set_available(false);
        store.projects_mut().push(Project::new(9, "offline", ""));
        assert!(store.save().is_err());
        assert!(matches!(
            store.persistence_status(),
            PersistenceStatus::InMemoryOnly { .. }
        ));
        assert_eq!(store.projects().len(), 3);

        store.backend_mut().set_available(true);
        store.save().unwrap();
        assert!(store.persistence_status().is_durable());
    }

    #[test]
    fn failed_read_keeps_seed_in_memory_without_writing() {
        let backend = MemoryKeyValueStore::unavailable();
        let mut store = ProjectStore::new(backend);
        assert_eq!(store.load(), seed_projects().as_slice());
        assert_eq!(store.last_load(), Some(LoadSource::SeedReadFailed));

        store.backend_mut().set_available(true);
        assert!(matches!(store.save(), Err(StoreError::WritesSuspended)));
        assert!(store.backend().peek(PROJECTS_STORAGE_KEY).is_none());
        assert!(!store.persistence_status().is_durable());
    }

    #[test]
    fn reset_discards_stored_state() {
        let mut store = ProjectStore::new(MemoryKeyValueStore::new());
        store.load();
        store.projects_mut().clear();
        store.save().unwrap();

        assert_eq!(store.reset(), seed_projects().as_slice());
    }
}
