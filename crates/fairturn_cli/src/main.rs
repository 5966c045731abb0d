//! CLI probe entry point.
//!
//! # Responsibility
//! - Verify `fairturn_core` linkage and print today's board from the
//!   configured store.
//! - Keep output plain and line-oriented for quick local sanity checks.

use chrono::Local;
use fairturn_core::db::open_db;
use fairturn_core::{
    core_version, init_logging_from_config, CoreConfig, RotationService, SqliteKvStore,
    DEFAULT_HISTORY_LIMIT,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("fairturn_core version={}", core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    match print_board(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fairturn failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_board(config: &CoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let store = SqliteKvStore::try_new(&conn)?;
    let mut service = RotationService::open(store);
    let now = Local::now();

    println!("store={}", config.db_path.display());
    println!("date={}", now.format("%A, %B %-d, %Y"));

    for task in service.tasks() {
        println!("task name={} cadence={}", task.name, task.frequency_label());
    }

    let assignments = service.today_assignments(&now)?.to_vec();
    if assignments.is_empty() {
        println!("No tasks assigned for today. Add people and tasks, or regenerate!");
    }
    for assignment in &assignments {
        println!("todo task={} person={}", assignment.task, assignment.person);
    }

    for entry in service.recent_history(DEFAULT_HISTORY_LIMIT) {
        println!(
            "done task={} person={} date={}",
            entry.task,
            entry.person,
            entry.date.with_timezone(&Local).format("%Y-%m-%d")
        );
    }
    Ok(())
}
