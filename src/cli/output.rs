use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based position in the store, usable with `done` and `rm`
    pub index: usize,
    pub title: String,
    pub description: String,
    pub category: String,
    pub completed: bool,
}

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        index: index + 1,
        title: task.title.clone(),
        description: task.description.clone(),
        category: task.category.clone(),
        completed: task.completed,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `  3  [✔] Title - Category`, followed by the description on its own
/// indented line when there is one.
pub fn format_task_text(index: usize, task: &Task) -> String {
    let mut out = format!(
        "{:>3}  [{}] {} - {}",
        index + 1,
        task.status_glyph(),
        task.title,
        task.category
    );
    if !task.description.is_empty() {
        for line in task.description.lines() {
            out.push_str("\n       ");
            out.push_str(line);
        }
    }
    out
}
