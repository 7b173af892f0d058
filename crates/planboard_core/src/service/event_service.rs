//! Event use-case service.

use super::{fresh_record_id, present, ServiceError, ServiceResult};
use crate::model::event::Event;
use crate::model::parse_timestamp;
use crate::repo::RecordRepository;
use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;

pub const TITLE_AND_DATE_REQUIRED: &str = "Title and date are required";
pub const INVALID_DATE: &str = "Invalid date";
pub const INVALID_DATE_RANGE: &str = "Invalid date range";

/// Create request; every field may be absent in the incoming JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Inclusive date-time window for event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventRange {
    /// Builds a range from optional query bounds.
    ///
    /// Returns `Ok(None)` unless both bounds are present.
    ///
    /// # Errors
    /// - `Validation(INVALID_DATE_RANGE)` when a present bound does not parse.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> ServiceResult<Option<Self>> {
        let (Some(start), Some(end)) = (present(start), present(end)) else {
            return Ok(None);
        };
        match (parse_timestamp(start), parse_timestamp(end)) {
            (Some(start), Some(end)) => Ok(Some(Self { start, end })),
            _ => Err(ServiceError::validation(INVALID_DATE_RANGE)),
        }
    }
}

/// Event service over an injected repository.
pub struct EventService<R: RecordRepository<Event>> {
    repo: R,
}

impl<R: RecordRepository<Event>> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists events in insertion order, optionally limited to `range`.
    pub fn list_events(&self, range: Option<EventRange>) -> ServiceResult<Vec<Event>> {
        let events = self.repo.list()?;
        Ok(match range {
            Some(range) => events
                .into_iter()
                .filter(|event| event.falls_within(range.start, range.end))
                .collect(),
            None => events,
        })
    }

    /// Creates an event with a generated id.
    ///
    /// # Errors
    /// - `Validation(TITLE_AND_DATE_REQUIRED)` when title or date is absent.
    /// - `Validation(INVALID_DATE)` when the date does not parse.
    pub fn create_event(&mut self, request: NewEvent) -> ServiceResult<Event> {
        let (Some(title), Some(date)) = (
            present(request.title.as_deref()),
            present(request.date.as_deref()),
        ) else {
            return Err(ServiceError::validation(TITLE_AND_DATE_REQUIRED));
        };
        let date = parse_timestamp(date).ok_or_else(|| ServiceError::validation(INVALID_DATE))?;

        let event = Event {
            id: fresh_record_id::<Event, _>(&self.repo)?,
            title: title.to_string(),
            description: request.description.unwrap_or_default(),
            date,
        };

        self.repo.insert(&event)?;
        info!("event=event_create module=service status=ok id={}", event.id);
        Ok(event)
    }
}
