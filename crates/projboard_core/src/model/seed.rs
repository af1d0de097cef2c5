//! Built-in dataset used when no stored state exists.

use crate::model::project::{Document, Priority, Project, Task};

/// Returns the two example projects written on first load.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Platform Requirements (SDLC Phase 1)".to_string(),
            description: "Stakeholder interviews, drafting the Software Requirements Specification (SRS), and finalizing technical architecture.".to_string(),
            tasks: vec![
                completed(Task::new(
                    101,
                    "Interview department heads (Scope confirmation)",
                    Priority::High,
                )),
                Task::new(102, "Draft SRS for Project Module", Priority::High),
                Task::new(103, "Finalize database schema (MongoDB)", Priority::Medium),
            ],
            documents: vec![
                Document::new(
                    1,
                    "Requirement_Specs_v1.pdf",
                    "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf",
                ),
                Document::new(
                    2,
                    "Stakeholder_Meeting_Notes.docx",
                    "https://example.com/notes.docx",
                ),
            ],
        },
        Project {
            id: 2,
            title: "Core System Implementation (SDLC Phase 3)".to_string(),
            description: "Development of the Node.js backend API and the primary front-end components.".to_string(),
            tasks: vec![
                completed(Task::new(
                    201,
                    "Set up Node/Express server environment",
                    Priority::High,
                )),
                Task::new(
                    202,
                    "Implement User Authentication endpoints (API)",
                    Priority::High,
                ),
                Task::new(
                    203,
                    "Develop frontend Task Card component (JS)",
                    Priority::Medium,
                ),
            ],
            documents: vec![
                Document::new(3, "API_Design_Doc.json", "https://example.com/api.json"),
                Document::new(4, "Budget_Spreadsheet.xlsx", "https://example.com/budget.xlsx"),
            ],
        },
    ]
}

fn completed(mut task: Task) -> Task {
    task.completed = true;
    task
}
