//! Completion percentage of a project.

use crate::model::project::Project;

/// `round(100 * done / total)`, or 0 for a project without tasks.
///
/// Rounds halves away from zero using integer arithmetic, so the result is
/// always within `0..=100`.
pub fn progress_percent(project: &Project) -> u8 {
    percent_of(project.completed_count(), project.tasks.len())
}

fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total) as u64;
    let total = total as u64;
    let rounded = (200 * done + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}
