use tracing::info;

use crate::model::store::TaskStore;
use crate::model::task::{Task, TaskId};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("title is required")]
    MissingTitle,
    #[error("category is required")]
    MissingCategory,
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("no task number {position} (there are {len} tasks)")]
    InvalidPosition { position: i64, len: usize },
    #[error("not a task number: {0:?}")]
    InvalidNumber(String),
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Append a new pending task. Title and category must be present;
/// whitespace-only counts as missing. Nothing changes on error.
pub fn add_task(
    store: &mut TaskStore,
    title: &str,
    description: &str,
    category: &str,
) -> Result<TaskId, TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::MissingTitle);
    }
    if category.trim().is_empty() {
        return Err(TaskError::MissingCategory);
    }
    let id = store.push(Task::new(title, description, category));
    info!(%id, title, category, "added task");
    Ok(id)
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Mark a task completed. Returns true when it was pending; repeating it is
/// harmless and returns false.
pub fn mark_completed(store: &mut TaskStore, id: TaskId) -> Result<bool, TaskError> {
    let task = store
        .entries
        .iter_mut()
        .find(|(tid, _)| *tid == id)
        .map(|(_, task)| task)
        .ok_or(TaskError::NotFound(id))?;
    if task.completed {
        return Ok(false);
    }
    task.completed = true;
    info!(%id, title = %task.title, "marked task completed");
    Ok(true)
}

/// Mark the task at a zero-based position completed
pub fn mark_completed_at(store: &mut TaskStore, index: usize) -> Result<&Task, TaskError> {
    let id = id_at(store, index)?;
    mark_completed(store, id)?;
    store.get(id).ok_or(TaskError::NotFound(id))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Remove a task; every later task moves up one position.
pub fn delete_task(store: &mut TaskStore, id: TaskId) -> Result<Task, TaskError> {
    let index = store.position(id).ok_or(TaskError::NotFound(id))?;
    let (_, task) = store.entries.remove(index);
    info!(%id, title = %task.title, "deleted task");
    Ok(task)
}

/// Remove the task at a zero-based position
pub fn delete_task_at(store: &mut TaskStore, index: usize) -> Result<Task, TaskError> {
    let id = id_at(store, index)?;
    delete_task(store, id)
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Parse a 1-based task number typed by the user into a zero-based index.
pub fn parse_position(input: &str, len: usize) -> Result<usize, TaskError> {
    let trimmed = input.trim();
    let position: i64 = trimmed
        .parse()
        .map_err(|_| TaskError::InvalidNumber(trimmed.to_string()))?;
    if position < 1 || position as u64 > len as u64 {
        return Err(TaskError::InvalidPosition { position, len });
    }
    Ok(position as usize - 1)
}

fn id_at(store: &TaskStore, index: usize) -> Result<TaskId, TaskError> {
    store.id_at(index).ok_or(TaskError::InvalidPosition {
        position: index as i64 + 1,
        len: store.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::default();
        add_task(&mut store, "Buy milk", "2%", "Personal").unwrap();
        add_task(&mut store, "Write report", "", "Work").unwrap();
        add_task(&mut store, "Call plumber", "sink", "Home").unwrap();
        store
    }

    fn titles(store: &TaskStore) -> Vec<&str> {
        store.tasks().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn add_appends_pending_task() {
        let mut store = TaskStore::default();
        let id = add_task(&mut store, "Buy milk", "2%", "Personal").unwrap();
        assert_eq!(store.len(), 1);
        let task = store.get(id).unwrap();
        assert_eq!(task, &Task::new("Buy milk", "2%", "Personal"));
    }

    #[test]
    fn add_without_title_or_category_changes_nothing() {
        let mut store = sample_store();
        assert_eq!(
            add_task(&mut store, "", "desc", "Work"),
            Err(TaskError::MissingTitle)
        );
        assert_eq!(
            add_task(&mut store, "Title", "desc", ""),
            Err(TaskError::MissingCategory)
        );
        assert_eq!(
            add_task(&mut store, "   ", "", "Work"),
            Err(TaskError::MissingTitle)
        );
        assert_eq!(
            add_task(&mut store, "", "", ""),
            Err(TaskError::MissingTitle)
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_allows_empty_description() {
        let mut store = TaskStore::default();
        assert!(add_task(&mut store, "Title", "", "Work").is_ok());
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut store = sample_store();
        let id = store.id_at(1).unwrap();
        assert!(mark_completed(&mut store, id).unwrap());
        let once = store.get(id).unwrap().clone();
        assert!(!mark_completed(&mut store, id).unwrap());
        let twice = store.get(id).unwrap().clone();
        assert!(once.completed);
        assert_eq!(once, twice);
        assert_eq!(twice.title, "Write report");
        assert_eq!(twice.category, "Work");
        assert_eq!(store.len(), 3);
        // Other tasks untouched
        assert!(!store.get(store.id_at(0).unwrap()).unwrap().completed);
    }

    #[test]
    fn mark_completed_at_out_of_range() {
        let mut store = sample_store();
        assert_eq!(
            mark_completed_at(&mut store, 3).unwrap_err(),
            TaskError::InvalidPosition {
                position: 4,
                len: 3
            }
        );
    }

    #[test]
    fn delete_shifts_later_tasks_down() {
        let mut store = sample_store();
        let third = store.id_at(2).unwrap();
        let removed = delete_task_at(&mut store, 1).unwrap();
        assert_eq!(removed.title, "Write report");
        assert_eq!(store.len(), 2);
        assert_eq!(titles(&store), vec!["Buy milk", "Call plumber"]);
        // The id follows the task to its new position
        assert_eq!(store.position(third), Some(1));
    }

    #[test]
    fn delete_unknown_id() {
        let mut store = sample_store();
        let id = store.id_at(0).unwrap();
        delete_task(&mut store, id).unwrap();
        assert_eq!(delete_task(&mut store, id), Err(TaskError::NotFound(id)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = sample_store();
        let last = store.id_at(2).unwrap();
        delete_task(&mut store, last).unwrap();
        let fresh = add_task(&mut store, "New", "", "Work").unwrap();
        assert_ne!(fresh, last);
    }

    #[test]
    fn parse_position_accepts_one_based_numbers() {
        assert_eq!(parse_position("1", 3), Ok(0));
        assert_eq!(parse_position(" 3\n", 3), Ok(2));
    }

    #[test]
    fn parse_position_rejects_bad_input() {
        assert_eq!(
            parse_position("abc", 3),
            Err(TaskError::InvalidNumber("abc".into()))
        );
        assert_eq!(parse_position("", 3), Err(TaskError::InvalidNumber("".into())));
        assert_eq!(
            parse_position("0", 3),
            Err(TaskError::InvalidPosition { position: 0, len: 3 })
        );
        assert_eq!(
            parse_position("-1", 3),
            Err(TaskError::InvalidPosition {
                position: -1,
                len: 3
            })
        );
        assert_eq!(
            parse_position("4", 3),
            Err(TaskError::InvalidPosition { position: 4, len: 3 })
        );
        assert!(parse_position("1", 0).is_err());
    }
}
