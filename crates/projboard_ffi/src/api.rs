//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the board's UI operations to Dart via FRB.
//! - Translate core results into plain envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Each call re-hydrates the board from storage, so the stored document
//!   is the only state shared between calls.
//! - Selection is owned by the UI and passed in; it is never persisted.

use log::warn;
use projboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, KeyValueStore,
    MemoryKeyValueStore, PersistenceStatus, Priority, Project, ProjectBoard, SqliteKeyValueStore,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const BOARD_DB_FILE_NAME: &str = "projboard.sqlite3";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type FfiBoard = ProjectBoard<Box<dyn KeyValueStore>>;

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub name: String,
    /// `High|Medium|Low`.
    pub priority: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentItem {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// Everything the UI needs to draw one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub progress_percent: u8,
    pub tasks: Vec<TaskItem>,
    pub documents: Vec<DocumentItem>,
    pub selected: bool,
}

/// Full board state after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub projects: Vec<ProjectItem>,
    /// Resolved selection; `None` when nothing (or an unknown id) is selected.
    pub selected_project_id: Option<i64>,
    /// `false` when changes only live in memory for this call.
    pub persisted: bool,
    pub message: String,
}

/// Result of a single board mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    pub ok: bool,
    /// Id of the created project/task/document, when one was created.
    pub created_id: Option<i64>,
    /// New completion value for toggles.
    pub completed: Option<bool>,
    pub persisted: bool,
    pub message: String,
}

impl BoardActionResponse {
    fn success(board: &FfiBoard, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            created_id: None,
            completed: None,
            persisted: board.persistence_status().is_durable(),
            message: with_persistence_note(message.into(), board.persistence_status()),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            created_id: None,
            completed: None,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Loads the board and selects the first project.
#[flutter_rust_bridge::frb(sync)]
pub fn board_load() -> BoardSnapshot {
    let board = open_board();
    snapshot(&board, "Board loaded.")
}

/// Loads the board with `project_id` as the current project.
///
/// Unknown ids produce a snapshot with no project selected.
#[flutter_rust_bridge::frb(sync)]
pub fn board_select_project(project_id: i64) -> BoardSnapshot {
    let mut board = open_board();
    let message = if board.select_project(project_id).is_some() {
        "Project selected."
    } else {
        "Project not found."
    };
    snapshot(&board, message)
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_add_project(title: String, description: String) -> BoardActionResponse {
    let mut board = open_board();
    let project = board.add_project(&title, &description);
    BoardActionResponse {
        created_id: Some(project.id),
        ..BoardActionResponse::success(&board, "Project created.")
    }
}

/// Adds a task; `priority` is `high|medium|low`, case-insensitive.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_task(project_id: i64, name: String, priority: String) -> BoardActionResponse {
    let priority = match priority.parse::<Priority>() {
        Ok(priority) => priority,
        Err(err) => return BoardActionResponse::failure(format!("board_add_task failed: {err}")),
    };
    let mut board = open_board();
    match board.add_task(project_id, &name, priority) {
        Ok(task) => BoardActionResponse {
            created_id: Some(task.id),
            ..BoardActionResponse::success(&board, "Task added.")
        },
        Err(err) => BoardActionResponse::failure(format!("board_add_task failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_toggle_task(project_id: i64, task_id: i64) -> BoardActionResponse {
    let mut board = open_board();
    match board.toggle_task(project_id, task_id) {
        Ok(completed) => BoardActionResponse {
            completed: Some(completed),
            ..BoardActionResponse::success(&board, "Task updated.")
        },
        Err(err) => BoardActionResponse::failure(format!("board_toggle_task failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_add_document(project_id: i64, name: String, url: String) -> BoardActionResponse {
    let mut board = open_board();
    match board.add_document(project_id, &name, &url) {
        Ok(document) => BoardActionResponse {
            created_id: Some(document.id),
            ..BoardActionResponse::success(&board, "Document attached.")
        },
        Err(err) => BoardActionResponse::failure(format!("board_add_document failed: {err}")),
    }
}

/// Drops stored state and returns the reseeded board.
#[flutter_rust_bridge::frb(sync)]
pub fn board_reset() -> BoardSnapshot {
    let mut board = open_board();
    board.reset();
    snapshot(&board, "Board reset to example projects.")
}

fn resolve_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PROJBOARD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

fn open_board() -> FfiBoard {
    let backend: Box<dyn KeyValueStore> = match SqliteKeyValueStore::open(resolve_db_path()) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("event=board_open module=ffi status=fallback mode=in_memory_only error={err}");
            Box::new(MemoryKeyValueStore::unavailable())
        }
    };
    ProjectBoard::open(backend)
}

fn snapshot(board: &FfiBoard, message: &str) -> BoardSnapshot {
    let selected_project_id = board.selected_project().map(|project| project.id);
    BoardSnapshot {
        projects: board
            .list_projects()
            .iter()
            .map(|project| to_project_item(board, project))
            .collect(),
        selected_project_id,
        persisted: board.persistence_status().is_durable(),
        message: with_persistence_note(message.to_string(), board.persistence_status()),
    }
}

fn to_project_item(board: &FfiBoard, project: &Project) -> ProjectItem {
    let view = board.project_view(project);
    ProjectItem {
        id: view.id,
        title: view.title.to_string(),
        description: view.description.to_string(),
        progress_percent: view.progress_percent,
        tasks: view
            .tasks
            .into_iter()
            .map(|task| TaskItem {
                id: task.id,
                name: task.name.clone(),
                priority: task.priority.to_string(),
                completed: task.completed,
            })
            .collect(),
        documents: view
            .documents
            .iter()
            .map(|doc| DocumentItem {
                id: doc.id,
                name: doc.name.clone(),
                url: doc.url.clone(),
            })
            .collect(),
        selected: view.selected,
    }
}

fn with_persistence_note(message: String, status: &PersistenceStatus) -> String {
    match status {
        PersistenceStatus::Durable => message,
        PersistenceStatus::InMemoryOnly { reason } => {
            format!("{message} Changes are not saved: {reason}")
        }
    }
}
