use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use fairturn_core::{assign_today, next_rotation_start, AppState, HistoryEntry, Task};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

fn roster(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("person-{i}")).collect()
}

fn arb_state() -> impl Strategy<Value = AppState> {
    (1usize..6, 1usize..6, prop::collection::vec((0usize..8, 0usize..8, 0i64..96), 0..12))
        .prop_flat_map(|(people, tasks, raw_history)| {
            let skip_mask = prop::collection::vec(any::<bool>(), people);
            let frequencies = prop::collection::vec(1u32..4, tasks);
            (Just((people, raw_history)), skip_mask, frequencies)
        })
        .prop_map(|((people, raw_history), skip_mask, frequencies)| {
            let names = roster(people);
            let tasks: Vec<Task> = frequencies
                .iter()
                .enumerate()
                .map(|(i, frequency)| Task::new(format!("task-{i}"), *frequency).unwrap())
                .collect();
            let mut history: Vec<HistoryEntry> = raw_history
                .into_iter()
                .map(|(task, person, hours_ago)| {
                    HistoryEntry::new(
                        format!("task-{task}"),
                        format!("person-{person}"),
                        now() - TimeDelta::hours(hours_ago),
                    )
                })
                .collect();
            history.sort_by(|a, b| a.date.cmp(&b.date));
            let skipped_people = names
                .iter()
                .zip(skip_mask)
                .filter(|(_, skipped)| *skipped)
                .map(|(name, _)| name.clone())
                .collect();
            AppState {
                people: names,
                tasks,
                history,
                skipped_people,
                ..AppState::default()
            }
        })
}

proptest! {
    #[test]
    fn next_start_follows_last_active_completer(size in 1usize..8, last in 0usize..8) {
        let people = roster(size);
        let last = last % size;
        let history = vec![HistoryEntry::new("Dishes", people[last].clone(), now())];

        let start = next_rotation_start(&people, &history);
        prop_assert_eq!(start, Some(people[(last + 1) % size].as_str()));
    }

    #[test]
    fn cold_start_picks_first_active_person(size in 1usize..8) {
        let people = roster(size);
        prop_assert_eq!(next_rotation_start(&people, &[]), Some(people[0].as_str()));
    }

    #[test]
    fn assign_today_is_deterministic(state in arb_state()) {
        prop_assert_eq!(assign_today(&state, now()), assign_today(&state, now()));
    }

    #[test]
    fn skipped_people_never_assigned_and_rotation_stays_contiguous(state in arb_state()) {
        let assignments = assign_today(&state, now());
        let active: Vec<&String> = state
            .people
            .iter()
            .filter(|person| !state.skipped_people.contains(person))
            .collect();

        for assignment in &assignments {
            prop_assert!(!state.skipped_people.contains(&assignment.person));
        }

        // Consecutive assignments go to consecutive active people.
        for pair in assignments.windows(2) {
            let a = active.iter().position(|p| **p == pair[0].person).unwrap();
            let b = active.iter().position(|p| **p == pair[1].person).unwrap();
            prop_assert_eq!(b, (a + 1) % active.len());
        }
    }

    #[test]
    fn at_most_one_assignment_per_task_in_sorted_order(state in arb_state()) {
        let assignments = assign_today(&state, now());
        let names: Vec<&str> = assignments.iter().map(|a| a.task.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(names, sorted);
    }
}
