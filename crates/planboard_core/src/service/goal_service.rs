//! Goal use-case service.
//!
//! # Invariants
//! - Created goals start incomplete unless requested otherwise, with
//!   `progress` 0 (100 when created complete) and the default color.
//! - Updates are shallow merges; absent or null fields keep stored values.
//! - `progress` is a whole number in `0..=100` whenever it is supplied.

use super::{fresh_record_id, present, ServiceError, ServiceResult};
use crate::model::goal::{Goal, GOAL_PROGRESS_COMPLETE};
use crate::model::parse_timestamp;
use crate::repo::RecordRepository;
use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const GOAL_ID_REQUIRED: &str = "Goal ID is required";
pub const GOAL_NOT_FOUND: &str = "Goal not found";
pub const INVALID_DUE_DATE: &str = "Invalid due date";
pub const INVALID_PROGRESS: &str = "Progress must be a whole number between 0 and 100";

/// Create request; every field may be absent in the incoming JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<String>,
    /// Any JSON number; range-checked by the service.
    pub progress: Option<f64>,
    pub color: Option<String>,
}

/// Partial update keyed by `id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<String>,
    pub progress: Option<f64>,
    pub color: Option<String>,
}

/// Goal service over an injected repository.
pub struct GoalService<R: RecordRepository<Goal>> {
    repo: R,
}

impl<R: RecordRepository<Goal>> GoalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists goals, optionally keeping only those whose `completed` matches.
    pub fn list_goals(&self, completed: Option<bool>) -> ServiceResult<Vec<Goal>> {
        let goals = self.repo.list()?;
        Ok(match completed {
            Some(wanted) => goals
                .into_iter()
                .filter(|goal| goal.completed == wanted)
                .collect(),
            None => goals,
        })
    }

    /// Creates a goal with a generated id.
    ///
    /// # Errors
    /// - `Validation(TITLE_REQUIRED)` when the title is absent or blank.
    /// - `Validation(INVALID_DUE_DATE)` when `due_date` does not parse.
    pub fn create_goal(&mut self, request: NewGoal) -> ServiceResult<Goal> {
        let title = present(request.title.as_deref())
            .ok_or_else(|| ServiceError::validation(TITLE_REQUIRED))?
            .to_string();
        let due_date = parse_due_date(request.due_date.as_deref())?;
        let progress = request.progress.map(checked_progress).transpose()?;
        let completed = request.completed.unwrap_or(false);
        let default_progress = if completed { GOAL_PROGRESS_COMPLETE } else { 0 };

        let mut goal = Goal::new(fresh_record_id::<Goal, _>(&self.repo)?, title);
        goal.description = request.description.unwrap_or_default();
        goal.completed = completed;
        goal.due_date = due_date;
        goal.progress = progress.unwrap_or(default_progress);
        if let Some(color) = present(request.color.as_deref()) {
            goal.color = color.to_string();
        }

        self.repo.insert(&goal)?;
        info!("event=goal_create module=service status=ok id={}", goal.id);
        Ok(goal)
    }

    /// Shallow-merges `patch` over the stored goal and returns the result.
    ///
    /// # Errors
    /// - `Validation(GOAL_ID_REQUIRED)` when `patch.id` is absent or blank.
    /// - `NotFound(GOAL_NOT_FOUND)` when no goal has that id.
    /// - `Validation(INVALID_DUE_DATE)` or `Validation(INVALID_PROGRESS)` for
    ///   malformed fields of an existing goal.
    pub fn update_goal(&mut self, patch: GoalPatch) -> ServiceResult<Goal> {
        let id = present(patch.id.as_deref())
            .ok_or_else(|| ServiceError::validation(GOAL_ID_REQUIRED))?;
        let mut goal = self
            .repo
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(GOAL_NOT_FOUND))?;

        if let Some(due_date) = parse_due_date(patch.due_date.as_deref())? {
            goal.due_date = Some(due_date);
        }
        if let Some(progress) = patch.progress.map(checked_progress).transpose()? {
            goal.progress = progress;
        }
        if let Some(title) = patch.title {
            goal.title = title;
        }
        if let Some(description) = patch.description {
            goal.description = description;
        }
        if let Some(completed) = patch.completed {
            goal.completed = completed;
        }
        if let Some(color) = patch.color {
            goal.color = color;
        }

        self.repo.replace(&goal)?;
        info!("event=goal_update module=service status=ok id={}", goal.id);
        Ok(goal)
    }

    /// Deletes one goal by id.
    ///
    /// # Errors
    /// - `Validation(GOAL_ID_REQUIRED)` for a blank id.
    /// - `NotFound(GOAL_NOT_FOUND)` when no goal has that id.
    pub fn delete_goal(&mut self, id: &str) -> ServiceResult<()> {
        let id = present(Some(id)).ok_or_else(|| ServiceError::validation(GOAL_ID_REQUIRED))?;
        if self.repo.get(id)?.is_none() {
            return Err(ServiceError::not_found(GOAL_NOT_FOUND));
        }
        self.repo.delete(id)?;
        info!("event=goal_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Flips completion of one goal; see `Goal::toggle_completion`.
    pub fn toggle_goal(&mut self, id: &str) -> ServiceResult<Goal> {
        let mut goal = self
            .repo
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(GOAL_NOT_FOUND))?;
        goal.toggle_completion();
        self.repo.replace(&goal)?;
        info!(
            "event=goal_toggle module=service status=ok id={} completed={}",
            goal.id, goal.completed
        );
        Ok(goal)
    }
}

fn checked_progress(value: f64) -> ServiceResult<u8> {
    if value.fract() != 0.0 || !(0.0..=f64::from(GOAL_PROGRESS_COMPLETE)).contains(&value) {
        return Err(ServiceError::validation(INVALID_PROGRESS));
    }
    Ok(value as u8)
}

fn parse_due_date(value: Option<&str>) -> ServiceResult<Option<DateTime<Utc>>> {
    match present(value) {
        Some(text) => parse_timestamp(text)
            .map(Some)
            .ok_or_else(|| ServiceError::validation(INVALID_DUE_DATE)),
        None => Ok(None),
    }
}
