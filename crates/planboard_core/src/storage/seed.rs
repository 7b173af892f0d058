//! Static defaults written by `LocalStore::initialize` into empty storage.

use crate::model::goal::Goal;
use crate::model::habit::Habit;
use crate::model::task::Task;
use crate::model::utc_timestamp;

/// Default goals for a fresh store.
pub fn default_goals() -> Vec<Goal> {
    vec![
        Goal {
            description: "Finish the calendar app implementation".to_string(),
            due_date: utc_timestamp(2024, 4, 1, 0, 0),
            ..Goal::new("1", "Complete Project")
        },
        Goal {
            description: "Master Next.js and React development".to_string(),
            due_date: utc_timestamp(2024, 5, 1, 0, 0),
            ..Goal::new("2", "Learn Next.js")
        },
    ]
}

/// Default tasks for a fresh store.
pub fn default_tasks() -> Vec<Task> {
    vec![Task {
        id: "1".to_string(),
        title: "Set up GitHub Pages".to_string(),
        description: "Configure static deployment".to_string(),
        due_date: utc_timestamp(2024, 3, 20, 0, 0),
        completed: false,
        goal_id: Some("1".to_string()),
    }]
}

/// Default habits for a fresh store.
pub fn default_habits() -> Vec<Habit> {
    vec![Habit {
        id: "1".to_string(),
        title: "Code Review".to_string(),
        description: "Review code daily".to_string(),
        frequency: "daily".to_string(),
        streak: 0,
    }]
}
