//! Core domain logic for FairTurn, a fair chore-rotation assistant.
//! This crate is the single source of truth for rotation invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod rotation;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::history::{Assignment, HistoryEntry};
pub use model::state::AppState;
pub use model::task::{parse_frequency, Task, TaskValidationError, DAILY, WEEKLY};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::state_repo::StateRepository;
pub use rotation::engine::{active_people, assign_today, is_due, next_rotation_start};
pub use service::rotation_service::{
    RotationService, RotationServiceError, ServiceResult, DEFAULT_HISTORY_LIMIT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
