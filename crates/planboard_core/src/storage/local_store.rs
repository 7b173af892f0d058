//! Generic collection CRUD over a key-value backend.

use super::backend::KeyValueBackend;
use super::environment::RuntimeEnvironment;
use super::seed::{default_goals, default_habits, default_tasks};
use super::{StorageError, StorageResult, EVENTS_KEY, GOALS_KEY, HABITS_KEY, NOTES_KEY, TASKS_KEY};
use crate::model::event::Event;
use crate::model::goal::Goal;
use crate::model::habit::Habit;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::model::Record;
use log::{debug, info, warn};
use std::marker::PhantomData;

/// Collection store bound to one backend and one runtime environment.
pub struct LocalStore<B: KeyValueBackend> {
    backend: B,
    environment: RuntimeEnvironment,
}

impl<B: KeyValueBackend> LocalStore<B> {
    pub fn new(backend: B, environment: RuntimeEnvironment) -> Self {
        Self {
            backend,
            environment,
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    /// Read-only access to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Seeds goals, tasks and habits where nothing is stored yet.
    ///
    /// Safe to call on every start. Notes and events are left untouched.
    ///
    /// # Errors
    /// - Returns backend errors from the presence check or the seed write.
    pub fn initialize(&mut self) -> StorageResult<()> {
        if !self.environment.has_local_storage() {
            debug!(
                "event=store_init module=storage status=skipped environment={}",
                self.environment
            );
            return Ok(());
        }

        let mut seeded = Vec::new();
        if self.seed_if_absent(GOALS_KEY, &default_goals())? {
            seeded.push(GOALS_KEY);
        }
        if self.seed_if_absent(TASKS_KEY, &default_tasks())? {
            seeded.push(TASKS_KEY);
        }
        if self.seed_if_absent(HABITS_KEY, &default_habits())? {
            seeded.push(HABITS_KEY);
        }

        info!(
            "event=store_init module=storage status=ok seeded_keys={}",
            seeded.len()
        );
        Ok(())
    }

    /// Returns every record stored under `key`.
    ///
    /// Yields an empty list when storage is unavailable, the key is absent,
    /// the backend read fails or the stored value does not decode.
    pub fn get_all<T: Record>(&self, key: &str) -> Vec<T> {
        if !self.environment.has_local_storage() {
            return Vec::new();
        }

        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=store_read module=storage status=error key={key} error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event=store_read module=storage status=corrupt key={key} kind={} error={err}",
                    T::KIND
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the full list stored under `key`.
    pub fn set_all<T: Record>(&mut self, key: &str, items: &[T]) -> StorageResult<()> {
        if !self.environment.has_local_storage() {
            return Ok(());
        }

        let raw = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.write(key, &raw)
    }

    /// Appends `item` and writes the full list back.
    pub fn add<T: Record>(&mut self, key: &str, item: T) -> StorageResult<()> {
        let mut items = self.get_all::<T>(key);
        items.push(item);
        self.set_all(key, &items)
    }

    /// Replaces the first record whose id matches `item`.
    ///
    /// Returns `Ok(false)` without writing anything when no record matches.
    pub fn update<T: Record>(&mut self, key: &str, item: T) -> StorageResult<bool> {
        let mut items = self.get_all::<T>(key);
        let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) else {
            return Ok(false);
        };
        *slot = item;
        self.set_all(key, &items)?;
        Ok(true)
    }

    /// Writes the list back with every record matching `id` filtered out.
    pub fn remove<T: Record>(&mut self, key: &str, id: &str) -> StorageResult<()> {
        let items = self
            .get_all::<T>(key)
            .into_iter()
            .filter(|item| item.id() != id)
            .collect::<Vec<_>>();
        self.set_all(key, &items)
    }

    pub fn goals(&mut self) -> CollectionHandle<'_, B, Goal> {
        CollectionHandle::new(self, GOALS_KEY)
    }

    pub fn tasks(&mut self) -> CollectionHandle<'_, B, Task> {
        CollectionHandle::new(self, TASKS_KEY)
    }

    pub fn habits(&mut self) -> CollectionHandle<'_, B, Habit> {
        CollectionHandle::new(self, HABITS_KEY)
    }

    pub fn notes(&mut self) -> CollectionHandle<'_, B, Note> {
        CollectionHandle::new(self, NOTES_KEY)
    }

    pub fn events(&mut self) -> CollectionHandle<'_, B, Event> {
        CollectionHandle::new(self, EVENTS_KEY)
    }

    fn seed_if_absent<T: Record>(&mut self, key: &str, defaults: &[T]) -> StorageResult<bool> {
        if self.backend.read(key)?.is_some() {
            return Ok(false);
        }
        self.set_all(key, defaults)?;
        Ok(true)
    }
}

/// Typed view of one collection inside a `LocalStore`.
pub struct CollectionHandle<'store, B: KeyValueBackend, T: Record> {
    store: &'store mut LocalStore<B>,
    key: &'static str,
    _record: PhantomData<T>,
}

impl<'store, B: KeyValueBackend, T: Record> CollectionHandle<'store, B, T> {
    fn new(store: &'store mut LocalStore<B>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    /// Storage key this handle reads and writes.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn get_all(&self) -> Vec<T> {
        self.store.get_all(self.key)
    }

    pub fn add(&mut self, item: T) -> StorageResult<()> {
        self.store.add(self.key, item)
    }

    pub fn update(&mut self, item: T) -> StorageResult<bool> {
        self.store.update(self.key, item)
    }

    pub fn remove(&mut self, id: &str) -> StorageResult<()> {
        self.store.remove::<T>(self.key, id)
    }
}
