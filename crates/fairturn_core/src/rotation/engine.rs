//! Rotation cursor, due-date checks and daily assignment.
//!
//! # Invariants
//! - Tasks are visited in case-sensitive lexicographic name order.
//! - A task that is not due produces no assignment and consumes no slot.
//! - Skipped people never appear in the output.

use crate::model::history::{Assignment, HistoryEntry};
use crate::model::state::AppState;
use crate::model::task::Task;
use chrono::{DateTime, TimeDelta, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Returns roster members not in the skip set, preserving roster order.
pub fn active_people(state: &AppState) -> Vec<&str> {
    state
        .people
        .iter()
        .filter(|person| !state.is_skipped(person))
        .map(String::as_str)
        .collect()
}

/// Returns who receives the first due task today.
///
/// Falls back to the first active person on cold start, or when history only
/// mentions people who are not active. When the last completer is not active
/// (skipped or removed) the rotation restarts from the top of the roster.
pub fn next_rotation_start<'a, S: AsRef<str>>(
    active_people: &'a [S],
    history: &[HistoryEntry],
) -> Option<&'a str> {
    let names: Vec<&'a str> = active_people.iter().map(AsRef::as_ref).collect();
    let first = *names.first()?;

    if !history
        .iter()
        .any(|entry| names.contains(&entry.person.as_str()))
    {
        return Some(first);
    }

    let last_index = history
        .last()
        .and_then(|entry| names.iter().position(|name| *name == entry.person))
        .unwrap_or(names.len() - 1);

    Some(names[(last_index + 1) % names.len()])
}

/// Returns the most recent history entry for `task_name`, if any.
pub fn last_completion<'a>(
    history: &'a [HistoryEntry],
    task_name: &str,
) -> Option<&'a HistoryEntry> {
    history.iter().rev().find(|entry| entry.task == task_name)
}

/// Fractional days elapsed since the last completion of `task_name`.
///
/// Returns `f64::INFINITY` when the task has never been completed.
pub fn days_since(history: &[HistoryEntry], task_name: &str, now: DateTime<Utc>) -> f64 {
    match last_completion(history, task_name) {
        Some(entry) => {
            now.signed_duration_since(entry.date).num_milliseconds() as f64 / MILLIS_PER_DAY
        }
        None => f64::INFINITY,
    }
}

/// Whether `task` must be done again at `now`.
///
/// Elapsed time is compared exactly: a task completed exactly `frequency`
/// days ago is due.
pub fn is_due(task: &Task, history: &[HistoryEntry], now: DateTime<Utc>) -> bool {
    let Some(entry) = last_completion(history, &task.name) else {
        return true;
    };
    match TimeDelta::try_days(i64::from(task.frequency)) {
        Some(interval) => now.signed_duration_since(entry.date) >= interval,
        None => false,
    }
}

/// Computes today's fair assignment list.
///
/// Due tasks are handed out one per active person in rotation order,
/// starting from `next_rotation_start` and wrapping around the roster.
/// Returns an empty list when nobody is active or no task exists.
pub fn assign_today(state: &AppState, now: DateTime<Utc>) -> Vec<Assignment> {
    let active = active_people(state);
    if active.is_empty() || state.tasks.is_empty() {
        return Vec::new();
    }

    let mut cursor = next_rotation_start(&active, &state.history)
        .and_then(|start| active.iter().position(|person| *person == start))
        .unwrap_or(0);

    let mut tasks: Vec<&Task> = state.tasks.iter().collect();
    tasks.sort_by(|a, b| a.name.cmp(&b.name));

    let mut assignments = Vec::new();
    for task in tasks {
        if !is_due(task, &state.history, now) {
            continue;
        }
        assignments.push(Assignment::new(task.name.as_str(), active[cursor]));
        cursor = (cursor + 1) % active.len();
    }

    assignments
}
