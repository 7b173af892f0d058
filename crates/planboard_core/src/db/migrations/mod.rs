//! Ordered schema steps for the planboard database.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - Pending steps run inside one transaction; `user_version` is bumped after
//!   each step so a partial run is impossible to observe.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "kv_entries",
        sql: include_str!("0001_kv_entries.sql"),
    },
    SchemaStep {
        version: 2,
        name: "records",
        sql: include_str!("0002_records.sql"),
    },
];

/// Version range covered by one `migrate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub from: u32,
    pub to: u32,
}

impl MigrationOutcome {
    /// Number of steps executed.
    pub fn applied(&self) -> u32 {
        self.to - self.from
    }
}

/// Newest schema version this binary can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version stored in the database header.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Runs every step newer than the stored schema version.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the stored version is ahead of this binary.
pub fn migrate(conn: &mut Connection) -> DbResult<MigrationOutcome> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported: to,
        });
    }

    let pending = SCHEMA_STEPS.iter().filter(|step| step.version > from);
    let tx = conn.transaction()?;
    for step in pending {
        debug!(
            "event=db_migrate module=db status=step version={} name={}",
            step.version, step.name
        );
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    Ok(MigrationOutcome { from, to })
}

#[cfg(test)]
mod tests {
    use super::{latest_version, SCHEMA_STEPS};

    #[test]
    fn steps_are_numbered_consecutively_from_one() {
        for (index, step) in SCHEMA_STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
        assert_eq!(latest_version() as usize, SCHEMA_STEPS.len());
    }
}
