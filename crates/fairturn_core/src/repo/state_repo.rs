//! Snapshot codec between `AppState` and the six persisted slots.
//!
//! # Responsibility
//! - Decode each slot independently with per-slot defaults.
//! - Encode and save the full snapshot in one batch.
//!
//! # Invariants
//! - A missing, unreadable or undecodable slot yields its default and a
//!   `warn` event; no load error crosses this boundary.
//! - Slot values are JSON documents.

use crate::model::state::AppState;
use crate::repo::kv_store::{KeyValueStore, RepoError, RepoResult};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const PEOPLE_KEY: &str = "fairTurnPeople";
pub const TASKS_KEY: &str = "fairTurnTasks";
pub const HISTORY_KEY: &str = "fairTurnHistory";
pub const ASSIGNMENTS_KEY: &str = "fairTurnAssignments";
pub const LAST_ASSIGNMENT_DATE_KEY: &str = "fairTurnLastAssignmentDate";
pub const SKIPPED_PEOPLE_KEY: &str = "fairTurnSkippedPeople";

/// Loads and saves `AppState` snapshots through a `KeyValueStore`.
pub struct StateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads every slot, substituting defaults for absent or broken ones.
    pub fn load_state(&self) -> AppState {
        let state = AppState {
            people: self.read_slot(PEOPLE_KEY).unwrap_or_default(),
            tasks: self.read_slot(TASKS_KEY).unwrap_or_default(),
            history: self.read_slot(HISTORY_KEY).unwrap_or_default(),
            assignments: self.read_slot(ASSIGNMENTS_KEY).unwrap_or_default(),
            last_assignment_date: self
                .read_slot::<Option<NaiveDate>>(LAST_ASSIGNMENT_DATE_KEY)
                .flatten(),
            skipped_people: self.read_slot(SKIPPED_PEOPLE_KEY).unwrap_or_default(),
        };
        debug!(
            "event=state_load module=repo status=ok people={} tasks={} history={} assignments={}",
            state.people.len(),
            state.tasks.len(),
            state.history.len(),
            state.assignments.len()
        );
        state
    }

    /// Writes all six slots of `state` as one batch.
    pub fn save_state(&self, state: &AppState) -> RepoResult<()> {
        let entries = [
            (PEOPLE_KEY, encode(PEOPLE_KEY, &state.people)?),
            (TASKS_KEY, encode(TASKS_KEY, &state.tasks)?),
            (HISTORY_KEY, encode(HISTORY_KEY, &state.history)?),
            (ASSIGNMENTS_KEY, encode(ASSIGNMENTS_KEY, &state.assignments)?),
            (
                LAST_ASSIGNMENT_DATE_KEY,
                encode(LAST_ASSIGNMENT_DATE_KEY, &state.last_assignment_date)?,
            ),
            (
                SKIPPED_PEOPLE_KEY,
                encode(SKIPPED_PEOPLE_KEY, &state.skipped_people)?,
            ),
        ];
        self.store.save_all(&entries)
    }

    fn read_slot<T: DeserializeOwned>(&self, key: &'static str) -> Option<T> {
        let raw = match self.store.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(
                    "event=slot_read module=repo status=error key={} error_code=load_failed error={}",
                    key, err
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=slot_read module=repo status=error key={} error_code=decode_failed error={}",
                    key, err
                );
                None
            }
        }
    }
}

fn encode<T: Serialize + ?Sized>(key: &'static str, value: &T) -> RepoResult<String> {
    serde_json::to_string(value).map_err(|source| RepoError::Encode { key, source })
}

#[cfg(test)]
mod tests {
    use super::{StateRepository, HISTORY_KEY, LAST_ASSIGNMENT_DATE_KEY, PEOPLE_KEY, TASKS_KEY};
    use crate::model::history::{Assignment, HistoryEntry};
    use crate::model::state::AppState;
    use crate::model::task::Task;
    use crate::repo::kv_store::{KeyValueStore, MemoryKvStore};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_state() -> AppState {
        AppState {
            people: vec!["Alice".to_string(), "Bob".to_string()],
            tasks: vec![Task::new("Dishes", 1).unwrap()],
            history: vec![HistoryEntry::new(
                "Dishes",
                "Alice",
                Utc.with_ymd_and_hms(2026, 10, 17, 20, 30, 0).unwrap(),
            )],
            assignments: vec![Assignment::new("Dishes", "Bob")],
            last_assignment_date: NaiveDate::from_ymd_opt(2026, 10, 18),
            skipped_people: vec!["Alice".to_string()],
        }
    }

    #[test]
    fn empty_store_loads_defaults() {
        let repo = StateRepository::new(MemoryKvStore::new());
        assert_eq!(repo.load_state(), AppState::default());
    }

    #[test]
    fn saved_snapshot_loads_back() {
        let repo = StateRepository::new(MemoryKvStore::new());
        let state = sample_state();
        repo.save_state(&state).unwrap();
        assert_eq!(repo.store().len(), 6);
        assert_eq!(repo.load_state(), state);
    }

    #[test]
    fn slots_use_documented_json_shapes() {
        let repo = StateRepository::new(MemoryKvStore::new());
        repo.save_state(&sample_state()).unwrap();

        let store = repo.store();
        assert_eq!(
            store.load(PEOPLE_KEY).unwrap().as_deref(),
            Some(r#"["Alice","Bob"]"#)
        );
        assert_eq!(
            store.load(TASKS_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"Dishes","frequency":1}]"#)
        );
        assert_eq!(
            store.load(LAST_ASSIGNMENT_DATE_KEY).unwrap().as_deref(),
            Some(r#""2026-10-18""#)
        );
        let history = store.load(HISTORY_KEY).unwrap().unwrap();
        assert!(history.contains(r#""date":"2026-10-17T20:30:00Z""#));
    }

    #[test]
    fn corrupted_slot_falls_back_without_affecting_others() {
        let store = MemoryKvStore::new();
        store.save(PEOPLE_KEY, r#"["Alice"]"#).unwrap();
        store.save(TASKS_KEY, "{not json").unwrap();
        store.save(LAST_ASSIGNMENT_DATE_KEY, "null").unwrap();

        let state = StateRepository::new(&store).load_state();
        assert_eq!(state.people, vec!["Alice".to_string()]);
        assert!(state.tasks.is_empty());
        assert_eq!(state.last_assignment_date, None);
    }

    #[test]
    fn history_accepts_millisecond_iso_timestamps() {
        let store = MemoryKvStore::new();
        store
            .save(
                HISTORY_KEY,
                r#"[{"task":"Dishes","person":"Alice","date":"2026-10-17T08:15:30.123Z"}]"#,
            )
            .unwrap();

        let state = StateRepository::new(&store).load_state();
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].person, "Alice");
    }
}
