//! Application snapshot owned by the rotation service.
//!
//! # Responsibility
//! - Hold the six persisted collections as one value.
//!
//! # Invariants
//! - The snapshot is loaded and saved as a whole.
//! - `history` is in append order, which is also chronological order.

use crate::model::history::{Assignment, HistoryEntry};
use crate::model::task::Task;
use chrono::NaiveDate;

/// Full rotation state: roster, tasks, history and today's board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Roster in insertion order; order drives rotation order.
    pub people: Vec<String>,
    pub tasks: Vec<Task>,
    pub history: Vec<HistoryEntry>,
    /// Cached assignment list for `last_assignment_date`.
    pub assignments: Vec<Assignment>,
    /// Calendar day the assignment list was computed for. `None` means the
    /// cache was invalidated or never computed.
    pub last_assignment_date: Option<NaiveDate>,
    /// People excluded from rotation for the current day.
    pub skipped_people: Vec<String>,
}

impl AppState {
    pub fn has_person(&self, name: &str) -> bool {
        self.people.iter().any(|person| person == name)
    }

    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.iter().any(|task| task.name == name)
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skipped_people.iter().any(|person| person == name)
    }
}
