//! SQLite record repository over the shared `records` table.
//!
//! # Invariants
//! - Rows are partitioned by `collection = T::KIND`.
//! - `position` grows monotonically per collection and defines list order.
//! - Stored bodies must decode as `T`; undecodable rows surface as
//!   `RepoError::InvalidData` instead of being skipped.

use super::{RecordRepository, RepoError, RepoResult};
use crate::model::Record;
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;

/// SQLite-backed repository for one record kind.
///
/// Owns its connection so it can move between threads; open it with
/// `db::open_db` so migrations are applied.
pub struct SqliteRecordRepository<T: Record> {
    conn: Connection,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqliteRecordRepository<T> {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn encode(record: &T) -> RepoResult<String> {
        serde_json::to_string(record).map_err(|err| {
            RepoError::InvalidData(format!(
                "failed to encode {} `{}`: {err}",
                T::KIND,
                record.id()
            ))
        })
    }

    fn decode(id: &str, body: &str) -> RepoResult<T> {
        serde_json::from_str(body).map_err(|err| {
            RepoError::InvalidData(format!(
                "undecodable {} body for id `{id}` in records.body: {err}",
                T::KIND
            ))
        })
    }

    fn exists(&self, id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM records WHERE collection = ?1 AND id = ?2
            );",
            params![T::KIND, id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl<T: Record> RecordRepository<T> for SqliteRecordRepository<T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body
             FROM records
             WHERE collection = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([T::KIND])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get("id")?;
            let body: String = row.get("body")?;
            records.push(Self::decode(&id, &body)?);
        }
        Ok(records)
    }

    fn get(&self, id: &str) -> RepoResult<Option<T>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM records WHERE collection = ?1 AND id = ?2;",
                params![T::KIND, id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        body.map(|body| Self::decode(id, &body)).transpose()
    }

    fn insert(&mut self, record: &T) -> RepoResult<()> {
        if self.exists(record.id())? {
            return Err(RepoError::Duplicate(record.id().to_string()));
        }

        let body = Self::encode(record)?;
        self.conn.execute(
            "INSERT INTO records (collection, id, position, body)
             VALUES (
                ?1,
                ?2,
                (SELECT COALESCE(MAX(position), 0) + 1 FROM records WHERE collection = ?1),
                ?3
             );",
            params![T::KIND, record.id(), body],
        )?;
        Ok(())
    }

    fn replace(&mut self, record: &T) -> RepoResult<()> {
        let body = Self::encode(record)?;
        let changed = self.conn.execute(
            "UPDATE records SET body = ?3 WHERE collection = ?1 AND id = ?2;",
            params![T::KIND, record.id(), body],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(record.id().to_string()));
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2;",
            params![T::KIND, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn is_empty(&self) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE collection = ?1;",
            [T::KIND],
            |row| row.get(0),
        )?;
        Ok(count == 0)
    }
}
