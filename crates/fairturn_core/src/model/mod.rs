//! Rotation domain model.
//!
//! # Responsibility
//! - Define the roster, task, history and assignment records shared by the
//!   rotation engine, repositories and services.
//! - Keep one snapshot shape (`AppState`) as the unit of persistence.
//!
//! # Invariants
//! - People and tasks are identified by their display names.
//! - History entries are append-only and may reference removed people/tasks.

pub mod history;
pub mod state;
pub mod task;
