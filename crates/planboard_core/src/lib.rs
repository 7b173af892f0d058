//! Core domain logic for planboard.
//! Records, the local collection store, record repositories and the
//! per-collection services used by the HTTP layer.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LogTarget};
pub use model::event::Event;
pub use model::goal::Goal;
pub use model::habit::Habit;
pub use model::note::Note;
pub use model::task::Task;
pub use model::{new_record_id, parse_timestamp, Record, RecordId};
pub use repo::{
    MemoryRecordRepository, RecordRepository, RepoError, RepoResult, SqliteRecordRepository,
};
pub use service::event_service::{EventRange, EventService, NewEvent};
pub use service::goal_service::{GoalPatch, GoalService, NewGoal};
pub use service::note_service::{NewNote, NoteService};
pub use service::{ServiceError, ServiceResult};
pub use storage::backend::{KeyValueBackend, MemoryKeyValueBackend, SqliteKeyValueBackend};
pub use storage::environment::{parse_runtime_environment, RuntimeEnvironment};
pub use storage::local_store::{CollectionHandle, LocalStore};
pub use storage::{StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
