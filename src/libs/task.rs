use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// A persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `None` until the store has assigned an identifier.
    pub id: Option<TaskId>,
    pub text: String,
    pub is_done: bool,
    /// Milliseconds since the Unix epoch of creation or of the last done/reopen
    /// transition. Only used for ordering.
    pub completed_or_reopened_timestamp: Option<i64>,
}

impl Task {
    /// A new, not yet completed task stamped with `timestamp`.
    pub fn new(text: &str, timestamp: i64) -> Self {
        Task {
            id: None,
            text: text.to_string(),
            is_done: false,
            completed_or_reopened_timestamp: Some(timestamp),
        }
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Copy of this task with a new done state and transition timestamp.
    pub fn with_done(&self, is_done: bool, timestamp: i64) -> Self {
        Task {
            is_done,
            completed_or_reopened_timestamp: Some(timestamp),
            ..self.clone()
        }
    }

    /// Copy of this task with only the text replaced.
    pub fn with_text(&self, text: &str) -> Self {
        Task {
            text: text.to_string(),
            ..self.clone()
        }
    }
}

/// Display-ready projection of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: TaskId,
    pub text: String,
    pub is_done: bool,
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
