//! Repository contract shared by all record kinds.

use super::RepoResult;
use crate::model::Record;

/// CRUD contract for one collection of `T`.
pub trait RecordRepository<T: Record> {
    /// All records in insertion order.
    fn list(&self) -> RepoResult<Vec<T>>;
    fn get(&self, id: &str) -> RepoResult<Option<T>>;
    /// Appends a new record. Fails with `Duplicate` when the id exists.
    fn insert(&mut self, record: &T) -> RepoResult<()>;
    /// Replaces the record with the same id. Fails with `NotFound`.
    fn replace(&mut self, record: &T) -> RepoResult<()>;
    /// Removes the record with `id`. Fails with `NotFound`.
    fn delete(&mut self, id: &str) -> RepoResult<()>;

    fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.list()?.is_empty())
    }
}

impl<T: Record, R: RecordRepository<T> + ?Sized> RecordRepository<T> for &mut R {
    fn list(&self) -> RepoResult<Vec<T>> {
        (**self).list()
    }

    fn get(&self, id: &str) -> RepoResult<Option<T>> {
        (**self).get(id)
    }

    fn insert(&mut self, record: &T) -> RepoResult<()> {
        (**self).insert(record)
    }

    fn replace(&mut self, record: &T) -> RepoResult<()> {
        (**self).replace(record)
    }

    fn delete(&mut self, id: &str) -> RepoResult<()> {
        (**self).delete(id)
    }

    fn is_empty(&self) -> RepoResult<bool> {
        (**self).is_empty()
    }
}

/// Inserts `records` when the repository holds nothing yet.
///
/// Returns whether anything was inserted.
pub fn seed_if_empty<T: Record, R: RecordRepository<T> + ?Sized>(
    repo: &mut R,
    records: &[T],
) -> RepoResult<bool> {
    if !repo.is_empty()? {
        return Ok(false);
    }
    for record in records {
        repo.insert(record)?;
    }
    Ok(true)
}
