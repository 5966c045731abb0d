//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path and logging settings with stable defaults.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - `log_level` is always one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "FAIRTURN_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "FAIRTURN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FAIRTURN_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "fairturn.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "fairturn-logs";

/// Settings needed to open the store and start logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Resolves configuration from process environment.
    ///
    /// # Errors
    /// - Returns an error when `FAIRTURN_LOG_LEVEL` is set to an unsupported
    ///   level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup` instead of the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw)?,
            None => default_log_level(),
        };
        let log_dir = non_blank(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
