//! Completion history and assignment records.
//!
//! # Invariants
//! - `HistoryEntry` values are immutable once appended.
//! - Entries keep raw names; the referenced person/task may no longer exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded completion of a task by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub task: String,
    pub person: String,
    /// Completion instant, persisted as an RFC 3339 UTC timestamp.
    pub date: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(task: impl Into<String>, person: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            task: task.into(),
            person: person.into(),
            date,
        }
    }
}

/// A task owed by a person for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub task: String,
    pub person: String,
}

impl Assignment {
    pub fn new(task: impl Into<String>, person: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            person: person.into(),
        }
    }
}
