//! ProjectState - Project Picker Selection

use crate::domain::project::{Project, seed_projects};

/// State for the project picker
#[derive(Debug, Clone)]
pub struct ProjectState {
    projects: Vec<Project>,
    selected_id: Option<String>,
}

impl ProjectState {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            selected_id: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Select a project by id
    ///
    /// Returns `false` and keeps the current selection for unknown ids.
    pub fn select(&mut self, project_id: &str) -> bool {
        if !self.projects.iter().any(|p| p.id == project_id) {
            return false;
        }
        self.selected_id = Some(project_id.to_string());
        true
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected_id
            .as_ref()
            .and_then(|id| self.projects.iter().find(|p| &p.id == id))
    }

    pub fn clear(&mut self) {
        self.selected_id = None;
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new(seed_projects())
    }
}
