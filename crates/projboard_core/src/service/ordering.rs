//! Display ordering for a project's tasks.
//!
//! # Invariants
//! - Ordering is a query; stored task order is never changed.
//! - Incomplete tasks come first, then priority descending, then
//!   insertion order.

use crate::model::project::Task;
use std::cmp::Ordering;

/// Comparator used for display: open before done, then higher priority.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.weight().cmp(&a.priority.weight()))
}

/// Returns borrowed tasks in display order.
pub fn ordered_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered = tasks.iter().collect::<Vec<_>>();
    // `sort_by` is stable, so ties keep insertion order.
    ordered.sort_by(|a, b| compare_tasks(a, b));
    ordered
}
