//! Project board domain model.
//!
//! # Responsibility
//! - Define the canonical records persisted by the store.
//! - Define the built-in seed dataset used when storage is empty.
//!
//! # Invariants
//! - Project ids are unique across the collection and never change.
//! - Task ids are unique within their parent project.
//! - Stored task order is insertion order; display order is derived.

pub mod project;
pub mod seed;
