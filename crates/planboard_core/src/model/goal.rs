//! Goal record.
//!
//! # Invariants
//! - `progress` is expected in `0..=100` but not enforced on replacement.
//! - Completing a goal snaps `progress` to 100; un-completing never restores
//!   the previous partial value.

use super::{Record, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display tag assigned to goals created without an explicit color.
pub const DEFAULT_GOAL_COLOR: &str = "bg-emerald-500";

/// Progress value of a completed goal.
pub const GOAL_PROGRESS_COMPLETE: u8 = 100;

/// Tracked personal goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Serialized as `null` when unset.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Percentage, 0 through 100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default = "default_goal_color")]
    pub color: String,
}

impl Goal {
    /// Creates an incomplete goal with zero progress and the default color.
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            completed: false,
            due_date: None,
            progress: 0,
            color: default_goal_color(),
        }
    }

    /// Flips completion state.
    ///
    /// Becoming complete sets `progress` to 100. Becoming incomplete leaves
    /// `progress` as it is.
    pub fn toggle_completion(&mut self) {
        self.completed = !self.completed;
        if self.completed {
            self.progress = GOAL_PROGRESS_COMPLETE;
        }
    }
}

impl Record for Goal {
    const KIND: &'static str = "goal";

    fn id(&self) -> &str {
        &self.id
    }
}

fn default_goal_color() -> String {
    DEFAULT_GOAL_COLOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::{Goal, DEFAULT_GOAL_COLOR};

    #[test]
    fn toggle_snaps_to_full_and_never_restores_partial_progress() {
        let mut goal = Goal::new("g1", "ship it");
        goal.progress = 45;

        goal.toggle_completion();
        assert!(goal.completed);
        assert_eq!(goal.progress, 100);

        goal.toggle_completion();
        assert!(!goal.completed);
        assert_eq!(goal.progress, 100);
    }

    #[test]
    fn serializes_camel_case_with_null_due_date() {
        let goal = Goal::new("g1", "ship it");
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["dueDate"], serde_json::Value::Null);
        assert_eq!(json["completed"], false);
        assert_eq!(json["color"], DEFAULT_GOAL_COLOR);
    }

    #[test]
    fn deserializes_sparse_json_with_defaults() {
        let goal: Goal = serde_json::from_str(r#"{"id":"7","title":"read"}"#).unwrap();
        assert_eq!(goal.description, "");
        assert_eq!(goal.progress, 0);
        assert_eq!(goal.color, DEFAULT_GOAL_COLOR);
        assert!(goal.due_date.is_none());
    }
}
