//! Habit record.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Recurring habit with a free-form frequency label (`daily`, `weekly`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub frequency: String,
    #[serde(default)]
    pub streak: u32,
}

impl Record for Habit {
    const KIND: &'static str = "habit";

    fn id(&self) -> &str {
        &self.id
    }
}
