//! Flat record types for every planboard collection.
//!
//! # Responsibility
//! - Define the serialized shape of goals, notes, events, habits and tasks.
//! - Provide the shared `Record` identity contract used by stores and repos.
//!
//! # Invariants
//! - Record ids are unique within one collection, never across collections.
//! - Serialized field names are camelCase to match the JSON API.
//! - Mutation is whole-record replacement; there is no soft delete.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod event;
pub mod goal;
pub mod habit;
pub mod note;
pub mod task;

/// Client-visible record identifier.
pub type RecordId = String;

const RECORD_ID_LEN: usize = 7;
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Common identity contract for stored records.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Stable collection kind, used as a storage discriminator and in logs.
    const KIND: &'static str;

    /// Returns the record identifier.
    fn id(&self) -> &str;
}

/// Generates a short random lowercase base-36 identifier.
///
/// No collision detection is performed; callers that need uniqueness must
/// check the target collection themselves.
pub fn new_record_id() -> RecordId {
    let mut bits = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(RECORD_ID_LEN);
    for _ in 0..RECORD_ID_LEN {
        id.push(char::from(BASE36_ALPHABET[(bits % 36) as usize]));
        bits /= 36;
    }
    id
}

/// Parses a client-supplied date or date-time into UTC.
///
/// Accepted forms:
/// - RFC 3339 (`2025-03-18T10:00:00Z`, `2025-03-18T10:00:00+02:00`)
/// - naive date-time, read as UTC (`2025-03-18T10:00:00`)
/// - calendar date, read as midnight UTC (`2025-03-18`)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Builds a UTC timestamp from calendar parts, used by static seed data.
pub(crate) fn utc_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::{new_record_id, parse_timestamp, utc_timestamp};

    #[test]
    fn record_ids_are_short_base36_tokens() {
        let id = new_record_id();
        assert_eq!(id.len(), 7);
        assert!(id
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
        assert_ne!(new_record_id(), new_record_id());
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_naive_and_date_forms() {
        let expected = utc_timestamp(2025, 3, 18, 10, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-18T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-18T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-18T10:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-03-18"),
            utc_timestamp(2025, 3, 18, 0, 0)
        );
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp("2025-13-40"), None);
    }
}
