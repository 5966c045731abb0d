//! Recurring task model and input validation.
//!
//! # Responsibility
//! - Define the recurring `Task` record and its frequency semantics.
//! - Parse user-entered frequency text into a validated day count.
//!
//! # Invariants
//! - `name` is trimmed and non-empty.
//! - `frequency` is at least one day.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Preset frequency: every day.
pub const DAILY: u32 = 1;
/// Preset frequency: once a week.
pub const WEEKLY: u32 = 7;

/// Recurring chore rotated among active people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique display name, also used as identity in history.
    pub name: String,
    /// Recurrence interval in days.
    pub frequency: u32,
}

impl Task {
    /// Creates a task after normalizing and validating inputs.
    pub fn new(name: impl Into<String>, frequency: u32) -> Result<Self, TaskValidationError> {
        let task = Self {
            name: name.into().trim().to_string(),
            frequency,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks task invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if self.frequency < 1 {
            return Err(TaskValidationError::InvalidFrequency(
                self.frequency.to_string(),
            ));
        }
        Ok(())
    }

    /// Short human-readable cadence, e.g. `daily` or `every 3 days`.
    pub fn frequency_label(&self) -> String {
        match self.frequency {
            DAILY => "daily".to_string(),
            WEEKLY => "weekly".to_string(),
            days => format!("every {days} days"),
        }
    }
}

/// Validation errors for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task name is blank after trimming.
    EmptyName,
    /// Frequency input is not a whole number of days >= 1.
    InvalidFrequency(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name cannot be empty"),
            Self::InvalidFrequency(value) => write!(
                f,
                "invalid frequency `{value}`; expected a whole number of days >= 1"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Parses a custom frequency typed by the user.
///
/// Surrounding whitespace is ignored. Non-numeric input and values below one
/// day are rejected.
pub fn parse_frequency(input: &str) -> Result<u32, TaskValidationError> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(days) if days >= 1 => Ok(days),
        _ => Err(TaskValidationError::InvalidFrequency(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_frequency, Task, TaskValidationError, DAILY, WEEKLY};

    #[test]
    fn new_trims_name() {
        let task = Task::new("  Dishes ", DAILY).unwrap();
        assert_eq!(task.name, "Dishes");
        assert_eq!(task.frequency, 1);
    }

    #[test]
    fn new_rejects_blank_name_and_zero_frequency() {
        assert_eq!(Task::new("   ", DAILY), Err(TaskValidationError::EmptyName));
        assert!(matches!(
            Task::new("Laundry", 0),
            Err(TaskValidationError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn parse_frequency_accepts_padded_numbers() {
        assert_eq!(parse_frequency(" 3 ").unwrap(), 3);
        assert_eq!(parse_frequency("14").unwrap(), 14);
    }

    #[test]
    fn parse_frequency_rejects_non_numeric_and_sub_one() {
        for input in ["", "abc", "0", "-2", "1.5"] {
            let err = parse_frequency(input).unwrap_err();
            assert!(
                matches!(err, TaskValidationError::InvalidFrequency(_)),
                "input `{input}` should be rejected"
            );
        }
    }

    #[test]
    fn frequency_label_names_presets() {
        assert_eq!(Task::new("a", DAILY).unwrap().frequency_label(), "daily");
        assert_eq!(Task::new("b", WEEKLY).unwrap().frequency_label(), "weekly");
        assert_eq!(Task::new("c", 3).unwrap().frequency_label(), "every 3 days");
    }
}
