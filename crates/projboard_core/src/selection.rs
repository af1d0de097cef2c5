//! Which project is current for rendering. Pure state, never persisted.

use crate::model::project::{Project, ProjectId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ProjectId>,
}

impl Selection {
    /// Selection right after load: the first project, if any.
    pub fn initial(projects: &[Project]) -> Self {
        Self {
            selected: projects.first().map(|project| project.id),
        }
    }

    /// Sets the current id without checking that it exists.
    pub fn select(&mut self, id: ProjectId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<ProjectId> {
        self.selected
    }

    /// Resolves the selection; an unknown id resolves to no project.
    pub fn resolve<'p>(&self, projects: &'p [Project]) -> Option<&'p Project> {
        let id = self.selected?;
        projects.iter().find(|project| project.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::model::project::Project;

    #[test]
    fn initial_picks_first_project_or_none() {
        let projects = vec![Project::new(7, "a", ""), Project::new(3, "b", "")];
        assert_eq!(Selection::initial(&projects).selected_id(), Some(7));
        assert_eq!(Selection::initial(&[]).selected_id(), None);
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let projects = vec![Project::new(1, "a", "")];
        let mut selection = Selection::initial(&projects);
        selection.select(99);
        assert_eq!(selection.selected_id(), Some(99));
        assert!(selection.resolve(&projects).is_none());
    }
}
