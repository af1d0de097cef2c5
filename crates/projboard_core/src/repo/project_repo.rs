//! Project repository over `ProjectStore`.
//!
//! # Invariants
//! - New project ids are unique across the collection.
//! - New task ids are unique within the parent project.
//! - New document ids are unique across all documents.
//! - A failed save after an in-memory mutation does not fail the mutation;
//!   the store's persistence status reports it instead.

use crate::model::project::{
    allocate_id, Document, Priority, Project, ProjectId, Task, TaskId,
};
use crate::storage::KeyValueStore;
use crate::store::ProjectStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    ProjectNotFound(ProjectId),
    TaskNotFound {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound {
                project_id,
                task_id,
            } => write!(f, "task {task_id} not found in project {project_id}"),
        }
    }
}

impl Error for RepoError {}

/// Source of the millisecond readings used for id allocation.
pub type Clock = fn() -> i64;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

pub struct ProjectRepository<'s, B: KeyValueStore> {
    store: &'s mut ProjectStore<B>,
    clock: Clock,
}

impl<'s, B: KeyValueStore> ProjectRepository<'s, B> {
    pub fn new(store: &'s mut ProjectStore<B>) -> Self {
        Self::with_clock(store, epoch_millis)
    }

    pub fn with_clock(store: &'s mut ProjectStore<B>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub fn list(&self) -> &[Project] {
        self.store.projects()
    }

    pub fn find_by_id(&self, id: ProjectId) -> Option<&Project> {
        self.store.projects().iter().find(|project| project.id == id)
    }

    /// Appends a new empty project and returns a copy of it.
    ///
    /// Titles are not validated; callers trim input beforehand.
    pub fn create(&mut self, title: &str, description: &str) -> Project {
        let now = (self.clock)();
        let projects = self.store.projects_mut();
        let id = allocate_id(projects.iter().map(|project| project.id), now);
        let project = Project::new(id, title, description);
        projects.push(project.clone());
        self.persist("project_create", id);
        project
    }

    pub fn add_task(
        &mut self,
        project_id: ProjectId,
        name: &str,
        priority: Priority,
    ) -> RepoResult<Task> {
        let now = (self.clock)();
        let project = self.project_mut(project_id)?;
        let id = allocate_id(project.tasks.iter().map(|task| task.id), now);
        let task = Task::new(id, name, priority);
        project.tasks.push(task.clone());
        self.persist("task_add", project_id);
        Ok(task)
    }

    /// Flips completion of one task and returns the new value.
    pub fn toggle_task_completion(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> RepoResult<bool> {
        let completed = self
            .project_mut(project_id)?
            .find_task_mut(task_id)
            .ok_or(RepoError::TaskNotFound {
                project_id,
                task_id,
            })?
            .toggle();
        self.persist("task_toggle", project_id);
        Ok(completed)
    }

    pub fn add_document(
        &mut self,
        project_id: ProjectId,
        name: &str,
        url: &str,
    ) -> RepoResult<Document> {
        let now = (self.clock)();
        let existing_ids = self
            .store
            .projects()
            .iter()
            .flat_map(|project| project.documents.iter().map(|doc| doc.id))
            .collect::<Vec<_>>();
        let project = self.project_mut(project_id)?;
        let document = Document::new(allocate_id(existing_ids, now), name, url);
        project.documents.push(document.clone());
        self.persist("document_add", project_id);
        Ok(document)
    }

    fn project_mut(&mut self, id: ProjectId) -> RepoResult<&mut Project> {
        self.store
            .projects_mut()
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(RepoError::ProjectNotFound(id))
    }

    fn persist(&mut self, event: &str, project_id: ProjectId) {
        let status = if self.store.save().is_ok() {
            "ok"
        } else {
            "in_memory_only"
        };
        info!("event={event} module=repo status={status} project_id={project_id}");
    }
}
