//! Core domain types
//!
//! These types represent the burn job lifecycle and are shared between the
//! server (which persists and mutates them) and the client/CLI (which render them).

pub mod burn_job;
pub mod stage;
pub mod status;
