//! Runtime configuration for shells embedding the core.
//!
//! # Responsibility
//! - Resolve the library database path, storage key and log level.
//!
//! # Invariants
//! - Blank overrides are ignored in favor of defaults.

use crate::logging::default_log_level;
use crate::service::library_service::DEFAULT_LIBRARY_KEY;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "ESCOLA360_DB_PATH";
pub const LIBRARY_KEY_ENV: &str = "ESCOLA360_LIBRARY_KEY";
pub const LOG_LEVEL_ENV: &str = "ESCOLA360_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "escola360_library.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub library_key: String,
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            library_key: DEFAULT_LIBRARY_KEY.to_string(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            library_key: read(LIBRARY_KEY_ENV).unwrap_or(defaults.library_key),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
        }
    }
}
