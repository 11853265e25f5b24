//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure the SQLite connection behind the key-value adapter.
//! - Apply storage-table migrations in deterministic order.
//! - Tag every SQLite failure with the storage step that produced it.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key-value reads or writes happen before migrations succeed.
//! - A raw `rusqlite::Error` never leaves this crate without a [`DbStep`].

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage step a SQLite call belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStep {
    /// Opening the database file or in-memory handle.
    Open,
    /// Connection pragmas (busy timeout, journal mode).
    Configure,
    /// Reading `user_version` or applying pending migrations.
    Migrate,
    /// Reading one key from `kv_entries`.
    KvRead,
    /// Upserting one key into `kv_entries`.
    KvWrite,
}

impl DbStep {
    /// Stable label used in log lines and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Configure => "configure",
            Self::Migrate => "migrate",
            Self::KvRead => "kv_read",
            Self::KvWrite => "kv_write",
        }
    }

    /// Returns a mapper for `map_err` that tags a SQLite failure with this step.
    pub(crate) fn fail(self) -> impl FnOnce(rusqlite::Error) -> DbError {
        move |source| DbError::Sqlite { step: self, source }
    }
}

#[derive(Debug)]
pub enum DbError {
    Sqlite {
        step: DbStep,
        source: rusqlite::Error,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Step that failed; schema-version rejection counts as [`DbStep::Migrate`].
    pub fn step(&self) -> DbStep {
        match self {
            Self::Sqlite { step, .. } => *step,
            Self::UnsupportedSchemaVersion { .. } => DbStep::Migrate,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite { step, source } => {
                write!(f, "sqlite {} failed: {source}", step.as_str())
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
