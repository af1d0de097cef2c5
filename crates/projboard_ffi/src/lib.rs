//! Flutter-facing bindings for the ProjBoard core.

pub mod api;
