//! Fixture records loaded into fresh HTTP collections.

use crate::model::event::Event;
use crate::model::goal::{Goal, GOAL_PROGRESS_COMPLETE};
use crate::model::note::Note;
use crate::model::utc_timestamp;
use chrono::{DateTime, Utc};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    utc_timestamp(year, month, day, hour, minute).unwrap_or_default()
}

pub fn fixture_goals() -> Vec<Goal> {
    vec![
        Goal {
            description: "Finish the draft and send for review".to_string(),
            due_date: Some(at(2025, 3, 25, 0, 0)),
            progress: 70,
            ..Goal::new("1", "Complete project proposal")
        },
        Goal {
            description: "Complete the tutorial and build a sample app".to_string(),
            completed: true,
            due_date: Some(at(2025, 3, 15, 0, 0)),
            progress: GOAL_PROGRESS_COMPLETE,
            color: "bg-blue-500".to_string(),
            ..Goal::new("2", "Learn Next.js")
        },
        Goal {
            description: "Gather data and create presentation".to_string(),
            due_date: Some(at(2025, 4, 5, 0, 0)),
            progress: 30,
            color: "bg-orange-500".to_string(),
            ..Goal::new("3", "Prepare quarterly report")
        },
    ]
}

pub fn fixture_events() -> Vec<Event> {
    vec![
        Event {
            id: "1".to_string(),
            title: "Team Meeting".to_string(),
            description: "Weekly team sync".to_string(),
            date: at(2025, 3, 18, 10, 0),
        },
        Event {
            id: "2".to_string(),
            title: "Project Deadline".to_string(),
            description: "Submit final deliverables".to_string(),
            date: at(2025, 3, 22, 17, 0),
        },
        Event {
            id: "3".to_string(),
            title: "Client Presentation".to_string(),
            description: "Present quarterly results".to_string(),
            date: at(2025, 3, 25, 14, 30),
        },
    ]
}

pub fn fixture_notes() -> Vec<Note> {
    vec![
        Note {
            id: "1".to_string(),
            title: "Meeting Notes: Project Kickoff".to_string(),
            content: "Discussed project timeline and resource allocation. Need to follow up \
                      with the design team about the new mockups."
                .to_string(),
            created_at: at(2025, 3, 10, 0, 0),
            updated_at: at(2025, 3, 10, 0, 0),
            tags: Vec::new(),
        },
        Note {
            id: "2".to_string(),
            title: "Ideas for New Features".to_string(),
            content: "1. Improve onboarding process\n2. Launch new feature X\n\
                      3. Optimize database queries\n4. Conduct user research"
                .to_string(),
            created_at: at(2025, 3, 12, 0, 0),
            updated_at: at(2025, 3, 15, 0, 0),
            tags: Vec::new(),
        },
        Note {
            id: "3".to_string(),
            title: "Client Feedback Summary".to_string(),
            content: "- Positive response to the new UI\n- Concerns about loading speed\n\
                      - Requested additional reporting features"
                .to_string(),
            created_at: at(2025, 3, 16, 0, 0),
            updated_at: at(2025, 3, 16, 0, 0),
            tags: Vec::new(),
        },
    ]
}
