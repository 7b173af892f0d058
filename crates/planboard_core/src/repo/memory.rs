//! In-memory record repository.

use super::{RecordRepository, RepoError, RepoResult};
use crate::model::Record;

/// Vec-backed repository; contents live as long as the value does.
#[derive(Debug, Clone)]
pub struct MemoryRecordRepository<T: Record> {
    records: Vec<T>,
}

impl<T: Record> MemoryRecordRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Builds a repository pre-filled with `records`, kept in given order.
    pub fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }
}

impl<T: Record> Default for MemoryRecordRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordRepository<T> for MemoryRecordRepository<T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> RepoResult<Option<T>> {
        Ok(self.position(id).map(|index| self.records[index].clone()))
    }

    fn insert(&mut self, record: &T) -> RepoResult<()> {
        if self.position(record.id()).is_some() {
            return Err(RepoError::Duplicate(record.id().to_string()));
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn replace(&mut self, record: &T) -> RepoResult<()> {
        let index = self
            .position(record.id())
            .ok_or_else(|| RepoError::NotFound(record.id().to_string()))?;
        self.records[index] = record.clone();
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RepoResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        self.records.remove(index);
        Ok(())
    }

    fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.records.is_empty())
    }
}
