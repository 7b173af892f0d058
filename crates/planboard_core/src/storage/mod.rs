//! Local persistence adapter over a key-value backend.
//!
//! # Responsibility
//! - Keep each collection as one JSON-serialized list under a fixed key.
//! - Seed goals, tasks and habits with static defaults on first use.
//! - Provide generic get-all/add/update/remove per collection.
//!
//! # Invariants
//! - Reads never fail: absence, backend errors and corrupt values all degrade
//!   to an empty list.
//! - In `RuntimeEnvironment::Server` every operation is a no-op.
//! - Seeding never overwrites an existing value, even an empty list.
//! - Writers are not coordinated; the last full-list write wins.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod backend;
pub mod environment;
pub mod local_store;
pub mod seed;

/// Storage key of the goals collection.
pub const GOALS_KEY: &str = "calendar_app_goals";
/// Storage key of the tasks collection.
pub const TASKS_KEY: &str = "calendar_app_tasks";
/// Storage key of the habits collection.
pub const HABITS_KEY: &str = "calendar_app_habits";
/// Storage key of the notes collection. Not seeded.
pub const NOTES_KEY: &str = "calendar_app_notes";
/// Storage key of the events collection. Not seeded.
pub const EVENTS_KEY: &str = "calendar_app_events";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing a key-value backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize { key, source } => {
                write!(f, "failed to serialize collection `{key}`: {source}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
