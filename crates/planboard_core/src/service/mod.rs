//! Collection use-case services.
//!
//! # Responsibility
//! - Validate create/update input and fill defaults.
//! - Orchestrate repository calls into per-entity list/create/update/delete.
//!
//! # Invariants
//! - Services never bypass the injected repository.
//! - Caller mistakes surface as `Validation` or `NotFound`; everything else
//!   is a `Repo` failure.

use crate::model::{new_record_id, Record, RecordId};
use crate::repo::{RecordRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event_service;
pub mod fixtures;
pub mod goal_service;
pub mod note_service;

const MAX_ID_ATTEMPTS: usize = 8;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for collection use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Required input is missing or malformed. Message is caller-facing.
    Validation(String),
    /// Target record does not exist. Message is caller-facing.
    NotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    pub(crate) fn not_found(message: &str) -> Self {
        Self::NotFound(message.to_string())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) | Self::NotFound(message) => f.write_str(message),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Validation(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Returns the trimmed-nonempty value, or `None` for absent/blank input.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Picks a record id not yet used in `repo`.
pub(crate) fn fresh_record_id<T: Record, R: RecordRepository<T> + ?Sized>(
    repo: &R,
) -> ServiceResult<RecordId> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = new_record_id();
        if repo.get(&candidate)?.is_none() {
            return Ok(candidate);
        }
    }
    Err(ServiceError::Repo(RepoError::Duplicate(format!(
        "no free {} id after {MAX_ID_ATTEMPTS} attempts",
        T::KIND
    ))))
}
