//! Shared server state: one repository per HTTP collection.

use log::info;
use planboard_core::db::open_db;
use planboard_core::repo::record_repo::seed_if_empty;
use planboard_core::service::fixtures::{fixture_events, fixture_goals, fixture_notes};
use planboard_core::{
    Event, Goal, MemoryRecordRepository, Note, RecordRepository, SqliteRecordRepository,
};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type GoalRepo = Box<dyn RecordRepository<Goal> + Send>;
pub type NoteRepo = Box<dyn RecordRepository<Note> + Send>;
pub type EventRepo = Box<dyn RecordRepository<Event> + Send>;

/// Per-collection repositories.
pub struct Collections {
    pub goals: GoalRepo,
    pub notes: NoteRepo,
    pub events: EventRepo,
}

impl Collections {
    /// Fresh in-memory tables holding the fixture records.
    pub fn in_memory() -> Self {
        info!("event=collections_open module=state status=ok backend=memory");
        Self {
            goals: Box::new(MemoryRecordRepository::with_records(fixture_goals())),
            notes: Box::new(MemoryRecordRepository::with_records(fixture_notes())),
            events: Box::new(MemoryRecordRepository::with_records(fixture_events())),
        }
    }

    /// SQLite-backed tables; fixtures are inserted only into empty ones.
    pub fn open_sqlite(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut goals = SqliteRecordRepository::<Goal>::new(open_db(path)?);
        let mut notes = SqliteRecordRepository::<Note>::new(open_db(path)?);
        let mut events = SqliteRecordRepository::<Event>::new(open_db(path)?);

        let seeded = [
            seed_if_empty(&mut goals, &fixture_goals())?,
            seed_if_empty(&mut notes, &fixture_notes())?,
            seed_if_empty(&mut events, &fixture_events())?,
        ];
        info!(
            "event=collections_open module=state status=ok backend=sqlite seeded_collections={}",
            seeded.iter().filter(|seeded| **seeded).count()
        );

        Ok(Self {
            goals: Box::new(goals),
            notes: Box::new(notes),
            events: Box::new(events),
        })
    }
}

/// Cloneable handle shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    collections: Arc<Mutex<Collections>>,
}

impl AppState {
    pub fn new(collections: Collections) -> Self {
        Self {
            collections: Arc::new(Mutex::new(collections)),
        }
    }

    /// Locks all collections for the duration of one service call.
    ///
    /// Must not be held across an `.await`.
    pub fn lock(
        &self,
    ) -> Result<MutexGuard<'_, Collections>, PoisonError<MutexGuard<'_, Collections>>> {
        self.collections.lock()
    }
}
