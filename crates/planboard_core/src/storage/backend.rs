//! Key-value backends for the local store.

use super::StorageResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

/// Raw string key-value storage.
pub trait KeyValueBackend {
    /// Returns the stored value, or `None` when the key was never written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Process-local backend, used in tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueBackend {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueBackend for MemoryKeyValueBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed backend over the `kv_entries` table.
///
/// The connection must come from `db::open_db`/`open_db_in_memory` so the
/// schema is already migrated.
pub struct SqliteKeyValueBackend<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueBackend<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueBackend for SqliteKeyValueBackend<'_> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
