//! UI-facing board facade.
//!
//! # Responsibility
//! - Own the store and the selection state for one session.
//! - Run the "mutate, save, re-read" cycle behind each UI action.
//! - Expose read-only render projections.
//!
//! # Invariants
//! - Text input is trimmed here, before it reaches the repository.
//! - Every mutation persists the full collection (or degrades to
//!   in-memory-only state, reported through `persistence_status`).
//! - Rendering never reorders stored tasks.

use crate::model::project::{Document, Priority, Project, ProjectId, Task, TaskId};
use crate::repo::project_repo::{epoch_millis, Clock, ProjectRepository, RepoResult};
use crate::selection::Selection;
use crate::service::ordering;
use crate::service::progress;
use crate::storage::KeyValueStore;
use crate::store::{PersistenceStatus, ProjectStore};
use log::debug;

/// Read-only projection of one project for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView<'p> {
    pub id: ProjectId,
    pub title: &'p str,
    pub description: &'p str,
    /// Tasks in display order.
    pub tasks: Vec<&'p Task>,
    pub documents: &'p [Document],
    pub progress_percent: u8,
    pub selected: bool,
}

pub struct ProjectBoard<B: KeyValueStore> {
    store: ProjectStore<B>,
    selection: Selection,
    clock: Clock,
}

impl<B: KeyValueStore> ProjectBoard<B> {
    /// Creates a board and loads its state from `backend`.
    pub fn open(backend: B) -> Self {
        Self::open_with_clock(backend, epoch_millis)
    }

    /// Like `open`, with an explicit id clock.
    pub fn open_with_clock(backend: B, clock: Clock) -> Self {
        let mut board = Self {
            store: ProjectStore::new(backend),
            selection: Selection::default(),
            clock,
        };
        board.load_data();
        board
    }

    /// Re-hydrates from storage and resets selection to the first project.
    pub fn load_data(&mut self) -> &[Project] {
        self.store.load();
        self.selection = Selection::initial(self.store.projects());
        self.store.projects()
    }

    pub fn list_projects(&self) -> &[Project] {
        self.store.projects()
    }

    pub fn find_project(&self, id: ProjectId) -> Option<&Project> {
        self.store.projects().iter().find(|project| project.id == id)
    }

    /// Makes `id` current. Unknown ids render as "no project selected".
    pub fn select_project(&mut self, id: ProjectId) -> Option<&Project> {
        self.selection.select(id);
        debug!("event=project_select module=board project_id={id}");
        self.selected_project()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selection.resolve(self.store.projects())
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Creates a project and makes it current.
    pub fn add_project(&mut self, title: &str, description: &str) -> Project {
        let project = self.repo().create(title.trim(), description.trim());
        self.selection.select(project.id);
        project
    }

    pub fn add_task(
        &mut self,
        project_id: ProjectId,
        name: &str,
        priority: Priority,
    ) -> RepoResult<Task> {
        self.repo().add_task(project_id, name.trim(), priority)
    }

    /// Flips a task's completion state; returns the new value.
    pub fn toggle_task(&mut self, project_id: ProjectId, task_id: TaskId) -> RepoResult<bool> {
        self.repo().toggle_task_completion(project_id, task_id)
    }

    pub fn add_document(
        &mut self,
        project_id: ProjectId,
        name: &str,
        url: &str,
    ) -> RepoResult<Document> {
        self.repo().add_document(project_id, name.trim(), url.trim())
    }

    pub fn ordered_tasks<'p>(&self, project: &'p Project) -> Vec<&'p Task> {
        ordering::ordered_tasks(&project.tasks)
    }

    pub fn progress_percent(&self, project: &Project) -> u8 {
        progress::progress_percent(project)
    }

    pub fn project_view<'p>(&self, project: &'p Project) -> ProjectView<'p> {
        ProjectView {
            id: project.id,
            title: &project.title,
            description: &project.description,
            tasks: ordering::ordered_tasks(&project.tasks),
            documents: &project.documents,
            progress_percent: progress::progress_percent(project),
            selected: self.selection.selected_id() == Some(project.id),
        }
    }

    pub fn project_views(&self) -> Vec<ProjectView<'_>> {
        self.store
            .projects()
            .iter()
            .map(|project| self.project_view(project))
            .collect()
    }

    pub fn persistence_status(&self) -> &PersistenceStatus {
        self.store.persistence_status()
    }

    /// Discards stored state, reloads seed data and reselects.
    pub fn reset(&mut self) -> &[Project] {
        self.store.reset();
        self.selection = Selection::initial(self.store.projects());
        self.store.projects()
    }

    pub fn store(&self) -> &ProjectStore<B> {
        &self.store
    }

    pub fn into_store(self) -> ProjectStore<B> {
        self.store
    }

    fn repo(&mut self) -> ProjectRepository<'_, B> {
        ProjectRepository::with_clock(&mut self.store, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectBoard;
    use crate::model::project::Priority;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn open_selects_first_project() {
        let board = ProjectBoard::open(MemoryKeyValueStore::new());
        assert_eq!(board.selection().selected_id(), Some(1));
        assert_eq!(board.selected_project().unwrap().id, 1);
    }

    #[test]
    fn add_project_trims_input_and_selects_it() {
        let mut board = ProjectBoard::open_with_clock(MemoryKeyValueStore::new(), || 500);
        let project = board.add_project("  Launch  ", " notes ");
        assert_eq!(project.title, "Launch");
        assert_eq!(project.description, "notes");
        assert_eq!(board.selection().selected_id(), Some(500));
    }

    #[test]
    fn empty_titles_are_accepted() {
        let mut board = ProjectBoard::open(MemoryKeyValueStore::new());
        let project = board.add_project("   ", "");
        assert_eq!(project.title, "");
        assert!(board.find_project(project.id).is_some());
    }

    #[test]
    fn project_view_orders_tasks_and_marks_selection() {
        let mut board = ProjectBoard::open(MemoryKeyValueStore::new());
        board.add_task(1, "late low", Priority::Low).unwrap();
        let views = board.project_views();
        assert_eq!(views.len(), 2);

        let first = &views[0];
        assert!(first.selected);
        assert!(!views[1].selected);
        assert_eq!(first.progress_percent, 25);
        let ids = first.tasks.iter().map(|task| task.id).collect::<Vec<_>>();
        assert_eq!(ids[..2], [102, 103]);
        assert_eq!(ids[3], 101);
    }

    #[test]
    fn selecting_unknown_project_renders_nothing() {
        let mut board = ProjectBoard::open(MemoryKeyValueStore::new());
        assert!(board.select_project(404).is_none());
        assert!(board.project_views().iter().all(|view| !view.selected));
    }
}
