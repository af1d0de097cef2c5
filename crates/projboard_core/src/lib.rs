//! Core domain logic for ProjBoard.
//! This crate is the single source of truth for board invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod selection;
pub mod service;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{
    Document, DocumentId, Priority, PriorityParseError, Project, ProjectId, Task, TaskId,
};
pub use model::seed::seed_projects;
pub use repo::project_repo::{ProjectRepository, RepoError, RepoResult};
pub use selection::Selection;
pub use service::board_service::{ProjectBoard, ProjectView};
pub use service::ordering::{compare_tasks, ordered_tasks};
pub use service::progress::progress_percent;
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
    SCHEMA_VERSION,
};
pub use store::{
    LoadSource, PersistenceStatus, ProjectStore, StoreError, StoreResult, PROJECTS_STORAGE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
