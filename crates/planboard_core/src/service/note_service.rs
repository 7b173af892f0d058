//! Note use-case service.
//!
//! # Invariants
//! - Listing is sorted by `updated_at DESC, id ASC`.
//! - New notes get `created_at == updated_at`.
//! - Tags are stored normalized (see `normalize_tags`).

use super::{fresh_record_id, present, ServiceError, ServiceResult};
use crate::model::note::{normalize_tags, Note};
use crate::repo::RecordRepository;
use chrono::Utc;
use log::info;
use serde::Deserialize;

pub const TITLE_AND_CONTENT_REQUIRED: &str = "Title and content are required";
pub const NOTE_ID_REQUIRED: &str = "Note ID is required";
pub const NOTE_NOT_FOUND: &str = "Note not found";

/// Create request; every field may be absent in the incoming JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Absent and `null` both mean no tags.
    pub tags: Option<Vec<String>>,
}

/// Note service over an injected repository.
pub struct NoteService<R: RecordRepository<Note>> {
    repo: R,
}

impl<R: RecordRepository<Note>> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all notes, most recently updated first.
    pub fn list_notes(&self) -> ServiceResult<Vec<Note>> {
        let mut notes = self.repo.list()?;
        notes.sort_by(|left, right| {
            right
                .updated_at
                .cmp(&left.updated_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(notes)
    }

    /// Creates a note stamped with the current time.
    ///
    /// # Errors
    /// - `Validation(TITLE_AND_CONTENT_REQUIRED)` when either field is absent
    ///   or blank.
    pub fn create_note(&mut self, request: NewNote) -> ServiceResult<Note> {
        let (Some(title), Some(content)) = (
            present(request.title.as_deref()),
            present(request.content.as_deref()),
        ) else {
            return Err(ServiceError::validation(TITLE_AND_CONTENT_REQUIRED));
        };

        let now = Utc::now();
        let note = Note {
            id: fresh_record_id::<Note, _>(&self.repo)?,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            tags: normalize_tags(request.tags.as_deref().unwrap_or_default()),
        };

        self.repo.insert(&note)?;
        info!(
            "event=note_create module=service status=ok id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        Ok(note)
    }

    /// Deletes one note by id.
    ///
    /// # Errors
    /// - `Validation(NOTE_ID_REQUIRED)` for a blank id.
    /// - `NotFound(NOTE_NOT_FOUND)` when no note has that id.
    pub fn delete_note(&mut self, id: &str) -> ServiceResult<()> {
        let id = present(Some(id)).ok_or_else(|| ServiceError::validation(NOTE_ID_REQUIRED))?;
        if self.repo.get(id)?.is_none() {
            return Err(ServiceError::not_found(NOTE_NOT_FOUND));
        }
        self.repo.delete(id)?;
        info!("event=note_delete module=service status=ok id={id}");
        Ok(())
    }
}
