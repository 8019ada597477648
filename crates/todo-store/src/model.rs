//! Todo Model
//!
//! The single domain entity and its partial-update form.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use uuid::Uuid;

/// A single task record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    /// Opaque unique identifier, stable for the item's lifetime
    pub id: String,
    pub title: String,
    /// Free text, may be empty
    pub description: String,
    pub completed: bool,
    /// Creation instant, millisecond precision
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Create a pending todo with a fresh id, stamped with the current time
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at: now_millis(),
        }
    }
}

/// Current time truncated to what the stored form can represent
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
}

/// Fields to replace on an existing todo; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Overwrite only the supplied fields
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}
