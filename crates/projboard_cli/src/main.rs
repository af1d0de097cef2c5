//! ProjBoard command-line front end.
//!
//! Drives the board operations against a SQLite key-value file and prints
//! a plain-text rendering of the result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use projboard_core::{
    default_log_level, init_logging, KeyValueStore, MemoryKeyValueStore, PersistenceStatus,
    Priority, Project, ProjectBoard, ProjectId, SqliteKeyValueStore, TaskId,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "projboard")]
#[command(version)]
#[command(about = "Track projects, tasks and attached documents")]
struct Cli {
    /// SQLite file holding the board.
    #[arg(long, env = "PROJBOARD_DB_PATH", default_value = "projboard.sqlite3")]
    db: PathBuf,

    /// Keep state in memory for this invocation only.
    #[arg(long)]
    in_memory: bool,

    /// trace|debug|info|warn|error
    #[arg(long, env = "PROJBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, env = "PROJBOARD_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List project titles
    #[command(alias = "ls")]
    List,
    /// Show one project with ordered tasks, documents and progress
    Show {
        /// Project id; defaults to the first project.
        project: Option<ProjectId>,
    },
    /// Create a project
    AddProject {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add a task to a project
    AddTask {
        project: ProjectId,
        name: String,
        #[arg(long, short, default_value = "medium")]
        priority: Priority,
    },
    /// Flip a task between open and done
    Toggle { project: ProjectId, task: TaskId },
    /// Attach a document link to a project
    AddDoc {
        project: ProjectId,
        name: String,
        url: String,
    },
    /// Replace stored state with the example projects
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let mut board = ProjectBoard::open(open_backend(cli.in_memory, &cli.db));

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            for project in board.list_projects() {
                let marker = if board.selection().selected_id() == Some(project.id) {
                    '*'
                } else {
                    ' '
                };
                println!(
                    "{marker} {:>14}  {:>3}%  {}",
                    project.id,
                    board.progress_percent(project),
                    project.title
                );
            }
        }
        Commands::Show { project } => {
            if let Some(id) = project {
                board.select_project(id);
            }
            match board.selected_project() {
                Some(project) => render_project(&board, project),
                None => println!("Please select a project."),
            }
        }
        Commands::AddProject { title, description } => {
            let project = board.add_project(&title, &description);
            println!("created project {}", project.id);
        }
        Commands::AddTask {
            project,
            name,
            priority,
        } => {
            let task = board.add_task(project, &name, priority)?;
            println!("added task {} to project {project}", task.id);
        }
        Commands::Toggle { project, task } => {
            let completed = board.toggle_task(project, task)?;
            let state = if completed { "done" } else { "open" };
            println!("task {task} is now {state}");
        }
        Commands::AddDoc { project, name, url } => {
            let document = board.add_document(project, &name, &url)?;
            println!("attached document {} to project {project}", document.id);
        }
        Commands::Reset => {
            board.reset();
            println!("board reset to {} example projects", board.list_projects().len());
        }
    }

    if let PersistenceStatus::InMemoryOnly { reason } = board.persistence_status() {
        eprintln!("warning: changes were not saved: {reason}");
    }
    Ok(())
}

/// Falls back to a disabled backend when the board file cannot be opened,
/// so the command still runs on seed data and the status warning fires.
fn open_backend(in_memory: bool, db: &Path) -> Box<dyn KeyValueStore> {
    if in_memory {
        return Box::new(MemoryKeyValueStore::new());
    }
    match SqliteKeyValueStore::open(db) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!(
                "event=board_open module=cli status=fallback mode=in_memory_only error={err}"
            );
            Box::new(MemoryKeyValueStore::unavailable())
        }
    }
}

fn render_project<B: KeyValueStore>(board: &ProjectBoard<B>, project: &Project) {
    let view = board.project_view(project);
    println!("{} [{}]", view.title, view.id);
    if !view.description.is_empty() {
        println!("{}", view.description);
    }
    println!("{}% complete", view.progress_percent);

    println!("\nTasks");
    if view.tasks.is_empty() {
        println!("  (none)");
    }
    for task in &view.tasks {
        let check = if task.completed { 'x' } else { ' ' };
        println!("  [{check}] {:<6} {}  (#{})", task.priority, task.name, task.id);
    }

    println!("\nDocuments");
    if view.documents.is_empty() {
        println!("  (none)");
    }
    for doc in view.documents {
        println!("  {}  {}", doc.name, doc.url);
    }
}

#[cfg(test)]
mod tests {
    use super::{open_backend, Cli, Commands};
    use clap::{CommandFactory, Parser};
    use projboard_core::{PersistenceStatus, Priority, ProjectBoard};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_task_parses_priority_case_insensitively() {
        let cli = Cli::try_parse_from([
            "projboard",
            "--in-memory",
            "add-task",
            "1",
            "Draft",
            "-p",
            "HIGH",
        ])
        .unwrap();
        assert!(cli.in_memory);
        match cli.command {
            Some(Commands::AddTask {
                project,
                name,
                priority,
            }) => {
                assert_eq!(project, 1);
                assert_eq!(name, "Draft");
                assert_eq!(priority, Priority::High);
            }
            _ => panic!("expected add-task"),
        }
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let parsed = Cli::try_parse_from(["projboard", "add-task", "1", "Draft", "-p", "urgent"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unopenable_board_file_runs_in_memory_only() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("missing").join("board.sqlite3");

        let mut board = ProjectBoard::open(open_backend(false, &db));
        assert_eq!(board.list_projects().len(), 2);
        board.add_project("kept for this run", "");
        assert_eq!(board.list_projects().len(), 3);
        assert!(matches!(
            board.persistence_status(),
            PersistenceStatus::InMemoryOnly { .. }
        ));
    }
}
