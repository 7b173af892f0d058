//! SQLite bootstrap for the planboard record and key-value tables.
//!
//! # Responsibility
//! - Open file or in-memory connections configured for several writers.
//! - Bring the schema up to date before any caller touches a table.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A file written by a newer schema is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::MigrationOutcome;
pub use open::{open_db, open_db_in_memory, DbTarget};

pub type DbResult<T> = Result<T, DbError>;

/// SQLite bootstrap or query failure.
#[derive(Debug)]
pub enum DbError {
    /// The database could not be opened at all.
    Open {
        target: DbTarget,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
    /// The file carries a schema this binary does not know.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => write!(f, "cannot open {target}: {source}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "planboard schema v{found} is newer than supported v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Sqlite(source) => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
