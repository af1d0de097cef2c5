//! Repository layer over the store-owned project collection.
//!
//! # Responsibility
//! - Provide use-case oriented CRUD over projects and their sub-collections.
//! - Persist the full collection after every successful mutation.
//!
//! # Invariants
//! - Repositories borrow the store; they never copy the collection.
//! - Not-found is a semantic error and leaves the collection untouched.

pub mod project_repo;
