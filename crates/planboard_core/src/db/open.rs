//! Connection bootstrap.
//!
//! # Invariants
//! - File databases run in WAL mode so the per-collection connections of one
//!   process do not block each other's readers.
//! - Every returned connection waits up to five seconds on a locked database.
//! - Every returned connection is fully migrated.

use super::migrations::migrate;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a connection points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    File(PathBuf),
    Memory,
}

impl Display for DbTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "database file `{}`", path.display()),
            Self::Memory => f.write_str("in-memory database"),
        }
    }
}

/// Opens (creating if needed) a database file and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_target(DbTarget::File(path.as_ref().to_path_buf()))
}

/// Opens a private in-memory database and migrates it.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_target(DbTarget::Memory)
}

fn open_target(target: DbTarget) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = match target {
        DbTarget::File(_) => "file",
        DbTarget::Memory => "memory",
    };

    let opened = match &target {
        DbTarget::File(path) => Connection::open(path),
        DbTarget::Memory => Connection::open_in_memory(),
    };
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(source) => {
            error!(
                "event=db_open module=db status=error mode={mode} error_code=db_open_failed error={source}"
            );
            return Err(DbError::Open { target, source });
        }
    };

    let outcome = configure(&mut conn, &target).and_then(|()| migrate(&mut conn));
    match outcome {
        Ok(outcome) => {
            info!(
                "event=db_open module=db status=ok mode={mode} schema=v{} applied={} duration_ms={}",
                outcome.to,
                outcome.applied(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} error_code=db_bootstrap_failed error={err}"
            );
            Err(err)
        }
    }
}

fn configure(conn: &mut Connection, target: &DbTarget) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if matches!(target, DbTarget::File(_)) {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
    }
    Ok(())
}
