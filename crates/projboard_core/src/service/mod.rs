//! Board use-case services and derived views.
//!
//! # Responsibility
//! - Derive display order and progress from stored records.
//! - Orchestrate store, repository and selection into UI-facing calls.

pub mod board_service;
pub mod ordering;
pub mod progress;
