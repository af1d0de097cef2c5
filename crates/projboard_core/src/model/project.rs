//! Project, task and document records.
//!
//! Serialized field names match the persisted JSON document exactly, so a
//! stored collection written by an earlier session is read back unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier of a project. Epoch-millisecond or sequence based.
pub type ProjectId = i64;
/// Identifier of a task, unique within its project.
pub type TaskId = i64;
/// Identifier of an attached document.
pub type DocumentId = i64;

/// Task priority used by the display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank used for ordering; higher sorts first.
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Rejected priority text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityParseError(pub String);

impl Display for PriorityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported priority `{}`; expected high|medium|low",
            self.0
        )
    }
}

impl Error for PriorityParseError {}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(PriorityParseError(value.to_string())),
        }
    }
}

/// A unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task.
    pub fn new(id: TaskId, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            completed: false,
        }
    }

    /// Flips completion and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Named external reference attached to a project. No content is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub url: String,
}

impl Document {
    pub fn new(id: DocumentId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Top-level unit of work tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Project {
    /// Creates a project with empty task and document collections.
    pub fn new(id: ProjectId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            tasks: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }
}

/// Picks a fresh id for a scope given the current clock reading.
///
/// Returns `now_ms` unless an existing id in the scope is equal or newer,
/// in which case the id after the largest existing one is used. When that
/// would pass `i64::MAX`, the smallest unused positive id is used instead.
pub fn allocate_id(existing: impl IntoIterator<Item = i64>, now_ms: i64) -> i64 {
    let existing = existing.into_iter().collect::<HashSet<_>>();
    match existing.iter().max() {
        Some(&max) if max >= now_ms => max
            .checked_add(1)
            .unwrap_or_else(|| (1..).find(|id| !existing.contains(id)).unwrap_or(0)),
        _ => now_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::{allocate_id, Priority, Project, Task};

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn priority_weights_are_descending() {
        assert!(Priority::High.weight() > Priority::Medium.weight());
        assert!(Priority::Medium.weight() > Priority::Low.weight());
    }

    #[test]
    fn allocate_id_uses_clock_when_free() {
        assert_eq!(allocate_id([1, 2, 3], 1_000), 1_000);
        assert_eq!(allocate_id(Vec::new(), 42), 42);
    }

    #[test]
    fn allocate_id_bumps_past_colliding_ids() {
        assert_eq!(allocate_id([1_000, 5], 1_000), 1_001);
        assert_eq!(allocate_id([2_000], 1_000), 2_001);
    }

    #[test]
    fn allocate_id_reuses_smallest_gap_at_the_top_of_the_range() {
        assert_eq!(allocate_id([i64::MAX, 1, 2, 4], 1_000), 3);
        assert_eq!(allocate_id([i64::MAX], i64::MAX), 1);
    }

    #[test]
    fn task_json_uses_persisted_field_names() {
        let task = Task::new(7, "write docs", Priority::Medium);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "write docs",
                "priority": "Medium",
                "completed": false
            })
        );
    }

    #[test]
    fn project_missing_collections_default_to_empty() {
        let project: Project =
            serde_json::from_str(r#"{"id":1,"title":"t","description":"d"}"#).unwrap();
        assert!(project.tasks.is_empty());
        assert!(project.documents.is_empty());
    }
}
