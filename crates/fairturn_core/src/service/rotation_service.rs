//! Rotation use-case service.
//!
//! # Responsibility
//! - Own the in-memory `AppState` and persist it after every mutation.
//! - Validate roster/task commands before they touch state.
//! - Drive the daily refresh policy for the assignment cache.
//!
//! # Invariants
//! - A rejected command leaves both memory and storage unchanged.
//! - In-memory state is replaced only after the snapshot was saved.
//! - Roster, task and skip mutations invalidate the cached assignments
//!   without forgetting which day they were computed for.
//! - Skips are cleared whenever a previous calendar day rolls over.
//! - Names are trimmed at every command entry point.

use crate::model::history::{Assignment, HistoryEntry};
use crate::model::state::AppState;
use crate::model::task::{parse_frequency, Task, TaskValidationError};
use crate::repo::kv_store::{KeyValueStore, RepoError};
use crate::repo::state_repo::StateRepository;
use crate::rotation::engine::assign_today;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of history entries shown by default in recent-history views.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

pub type ServiceResult<T> = Result<T, RotationServiceError>;

/// Service error for rotation commands.
#[derive(Debug)]
pub enum RotationServiceError {
    /// Person name is blank after trimming.
    EmptyPersonName,
    /// Person already exists in the roster.
    DuplicatePerson(String),
    /// Person is not in the roster.
    PersonNotFound(String),
    /// Task name is blank after trimming.
    EmptyTaskName,
    /// Task with the same name already exists.
    DuplicateTask(String),
    /// Task does not exist.
    TaskNotFound(String),
    /// Frequency is not a whole number of days >= 1.
    InvalidFrequency(String),
    /// Completion was recorded without an assignee.
    NoAssignee(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for RotationServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPersonName => write!(f, "person name cannot be empty"),
            Self::DuplicatePerson(name) => write!(f, "person already exists: `{name}`"),
            Self::PersonNotFound(name) => write!(f, "person not found: `{name}`"),
            Self::EmptyTaskName => write!(f, "task name cannot be empty"),
            Self::DuplicateTask(name) => write!(f, "task already exists: `{name}`"),
            Self::TaskNotFound(name) => write!(f, "task not found: `{name}`"),
            Self::InvalidFrequency(value) => write!(
                f,
                "invalid frequency `{value}`; expected a whole number of days >= 1"
            ),
            Self::NoAssignee(task) => {
                write!(f, "task `{task}` has no one assigned; add people first")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RotationServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RotationServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TaskValidationError> for RotationServiceError {
    fn from(value: TaskValidationError) -> Self {
        match value {
            TaskValidationError::EmptyName => Self::EmptyTaskName,
            TaskValidationError::InvalidFrequency(raw) => Self::InvalidFrequency(raw),
        }
    }
}

/// Rotation service facade over a key-value store.
pub struct RotationService<S: KeyValueStore> {
    repo: StateRepository<S>,
    state: AppState,
}

impl<S: KeyValueStore> RotationService<S> {
    /// Loads the persisted snapshot from `store`.
    ///
    /// Missing or unreadable slots start from their defaults.
    pub fn open(store: S) -> Self {
        let repo = StateRepository::new(store);
        let state = repo.load_state();
        info!(
            "event=service_open module=service status=ok people={} tasks={} history={}",
            state.people.len(),
            state.tasks.len(),
            state.history.len()
        );
        Self { repo, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn people(&self) -> &[String] {
        &self.state.people
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    /// Cached assignment list; may be stale. Use `today_assignments` to
    /// refresh before display.
    pub fn assignments(&self) -> &[Assignment] {
        &self.state.assignments
    }

    pub fn last_assignment_date(&self) -> Option<NaiveDate> {
        self.state.last_assignment_date
    }

    pub fn skipped_people(&self) -> &[String] {
        &self.state.skipped_people
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.state.is_skipped(name)
    }

    /// Returns up to `limit` history entries, newest first.
    ///
    /// Entries with identical timestamps keep newest-appended first.
    pub fn recent_history(&self, limit: usize) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.state.history.iter().rev().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries.truncate(limit);
        entries
    }

    /// Whether the cached assignments were computed for the day of `now`.
    pub fn is_fresh<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.state.last_assignment_date == Some(now.date_naive())
            && !self.state.assignments.is_empty()
    }

    /// Adds a person to the end of the roster.
    ///
    /// # Errors
    /// - `EmptyPersonName` when `name` is blank.
    /// - `DuplicatePerson` when the trimmed name already exists.
    pub fn add_person(&mut self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RotationServiceError::EmptyPersonName);
        }
        if self.state.has_person(name) {
            return Err(RotationServiceError::DuplicatePerson(name.to_string()));
        }

        let mut next = self.state.clone();
        next.people.push(name.to_string());
        invalidate(&mut next);
        self.commit(next)?;
        info!(
            "event=person_add module=service status=ok roster_size={}",
            self.state.people.len()
        );
        Ok(())
    }

    /// Adds a recurring task.
    ///
    /// # Errors
    /// - `EmptyTaskName` / `InvalidFrequency` for invalid input.
    /// - `DuplicateTask` when a task with the trimmed name exists.
    pub fn add_task(&mut self, name: &str, frequency: u32) -> ServiceResult<()> {
        let task = Task::new(name, frequency)?;
        if self.state.has_task(&task.name) {
            return Err(RotationServiceError::DuplicateTask(task.name));
        }

        let mut next = self.state.clone();
        next.tasks.push(task);
        invalidate(&mut next);
        self.commit(next)?;
        info!(
            "event=task_add module=service status=ok frequency_days={} task_count={}",
            frequency,
            self.state.tasks.len()
        );
        Ok(())
    }

    /// Adds a task whose frequency was typed as free text, e.g. a custom
    /// day count from a form field.
    pub fn add_task_with_frequency_text(
        &mut self,
        name: &str,
        frequency: &str,
    ) -> ServiceResult<()> {
        let frequency = parse_frequency(frequency)?;
        self.add_task(name, frequency)
    }

    /// Flips the skip flag for a roster member and returns the new flag.
    pub fn toggle_skip(&mut self, name: &str) -> ServiceResult<bool> {
        let name = name.trim();
        if !self.state.has_person(name) {
            return Err(RotationServiceError::PersonNotFound(name.to_string()));
        }

        let mut next = self.state.clone();
        let skipped = if next.is_skipped(name) {
            next.skipped_people.retain(|person| person != name);
            false
        } else {
            next.skipped_people.push(name.to_string());
            true
        };
        invalidate(&mut next);
        self.commit(next)?;
        info!(
            "event=skip_toggle module=service status=ok skipped={} skipped_count={}",
            skipped,
            self.state.skipped_people.len()
        );
        Ok(skipped)
    }

    /// Removes a person from the roster and the skip set.
    ///
    /// History entries naming the person are kept.
    pub fn remove_person(&mut self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if !self.state.has_person(name) {
            return Err(RotationServiceError::PersonNotFound(name.to_string()));
        }

        let mut next = self.state.clone();
        next.people.retain(|person| person != name);
        next.skipped_people.retain(|person| person != name);
        invalidate(&mut next);
        self.commit(next)?;
        info!(
            "event=person_remove module=service status=ok roster_size={}",
            self.state.people.len()
        );
        Ok(())
    }

    /// Removes a task. History entries naming the task are kept.
    pub fn remove_task(&mut self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if !self.state.has_task(name) {
            return Err(RotationServiceError::TaskNotFound(name.to_string()));
        }

        let mut next = self.state.clone();
        next.tasks.retain(|task| task.name != name);
        invalidate(&mut next);
        self.commit(next)?;
        info!(
            "event=task_remove module=service status=ok task_count={}",
            self.state.tasks.len()
        );
        Ok(())
    }

    /// Records that `person` completed `task` at `now`.
    ///
    /// The matching entry leaves today's list without re-running the
    /// rotation.
    ///
    /// # Errors
    /// - `NoAssignee` when `person` is blank.
    /// - `EmptyTaskName` when `task` is blank.
    pub fn record_completion<Tz: TimeZone>(
        &mut self,
        task: &str,
        person: &str,
        now: &DateTime<Tz>,
    ) -> ServiceResult<()> {
        let task = task.trim();
        let person = person.trim();
        if task.is_empty() {
            return Err(RotationServiceError::EmptyTaskName);
        }
        if person.is_empty() {
            return Err(RotationServiceError::NoAssignee(task.to_string()));
        }

        let mut next = self.state.clone();
        next.history
            .push(HistoryEntry::new(task, person, now.with_timezone(&Utc)));
        if let Some(index) = next
            .assignments
            .iter()
            .position(|assignment| assignment.task == task && assignment.person == person)
        {
            next.assignments.remove(index);
        }
        self.commit(next)?;
        info!(
            "event=completion_record module=service status=ok history={} remaining_assignments={}",
            self.state.history.len(),
            self.state.assignments.len()
        );
        Ok(())
    }

    /// Returns today's assignments, recomputing them when stale.
    ///
    /// The cache is stale when it was computed for another day or is empty
    /// (never computed, invalidated, or fully completed). Rolling over from a
    /// previous day clears the skip set before recomputing.
    pub fn today_assignments<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
    ) -> ServiceResult<&[Assignment]> {
        if self.is_fresh(now) {
            return Ok(&self.state.assignments);
        }

        let today = now.date_naive();
        let mut next = self.state.clone();
        let rolled_over = matches!(next.last_assignment_date, Some(date) if date != today);
        if rolled_over {
            next.skipped_people.clear();
        }
        next.assignments = assign_today(&next, now.with_timezone(&Utc));
        next.last_assignment_date = Some(today);
        self.commit(next)?;
        info!(
            "event=assignments_refresh module=service status=ok trigger=view rolled_over={} assignments={}",
            rolled_over,
            self.state.assignments.len()
        );
        Ok(&self.state.assignments)
    }

    /// Recomputes today's assignments immediately.
    ///
    /// Unlike `today_assignments`, this never clears skips.
    pub fn regenerate<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> ServiceResult<&[Assignment]> {
        let mut next = self.state.clone();
        next.assignments = assign_today(&next, now.with_timezone(&Utc));
        next.last_assignment_date = Some(now.date_naive());
        self.commit(next)?;
        info!(
            "event=assignments_refresh module=service status=ok trigger=regenerate assignments={}",
            self.state.assignments.len()
        );
        Ok(&self.state.assignments)
    }

    fn commit(&mut self, next: AppState) -> ServiceResult<()> {
        if let Err(err) = self.repo.save_state(&next) {
            error!(
                "event=state_save module=service status=error error_code=save_failed error={}",
                err
            );
            return Err(err.into());
        }
        self.state = next;
        Ok(())
    }
}

/// Drops the cached board so the next view recomputes it.
///
/// `last_assignment_date` is kept: it still names the day the skip set
/// belongs to, so a rollover after an invalidation still clears skips.
fn invalidate(state: &mut AppState) {
    state.assignments.clear();
}
