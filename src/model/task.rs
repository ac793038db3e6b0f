use std::fmt;

use serde::{Deserialize, Serialize};

/// A single to-do entry, exactly as it is stored in the task file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    /// Short label (required, non-empty when created through `add_task`)
    pub title: String,
    /// Free text, may be empty
    pub description: String,
    /// Grouping label used for filtering (required, non-empty)
    pub category: String,
    /// Completion flag; absent in the file means not completed
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Task {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            completed: false,
        }
    }

    /// The glyph used for this task's completion state
    pub fn status_glyph(&self) -> char {
        if self.completed { '\u{2714}' } else { '\u{2718}' }
    }

    /// Status text shown in the form UI's table
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "\u{2714} Done"
        } else {
            "\u{2718} Pending"
        }
    }
}

/// Session-local identifier for a task in the store.
///
/// Assigned when a task is loaded or added and never written to disk, so it
/// stays stable while positions shift under deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_pending() {
        let task = Task::new("Buy milk", "2%", "Personal");
        assert!(!task.completed);
        assert_eq!(task.status_label(), "\u{2718} Pending");
        assert_eq!(task.status_glyph(), '\u{2718}');
    }

    #[test]
    fn missing_completed_defaults_to_false() {
        let task: Task =
            serde_json::from_str(r#"{"title":"a","description":"","category":"Work"}"#).unwrap();
        assert!(!task.completed);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Task, _> = serde_json::from_str(
            r#"{"title":"a","description":"","category":"Work","completed":false,"due":"x"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_description_is_rejected() {
        let result: Result<Task, _> =
            serde_json::from_str(r#"{"title":"a","category":"Work"}"#);
        assert!(result.is_err());
    }
}
