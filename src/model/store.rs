use super::task::{Task, TaskId};

/// The in-memory, insertion-ordered collection of tasks for one session.
///
/// Mutations live in `ops::task_ops`; this type only owns the list and hands
/// out stable ids.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    pub(crate) entries: Vec<(TaskId, Task)>,
    next_id: u64,
}

impl TaskStore {
    /// Build a store from tasks in file order, assigning fresh ids
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut store = TaskStore::default();
        for task in tasks {
            store.push(task);
        }
        store
    }

    /// Append a task and return the id it was given
    pub(crate) fn push(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, task));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All tasks with their ids, in store order
    pub fn entries(&self) -> &[(TaskId, Task)] {
        &self.entries
    }

    /// All tasks in store order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.entries.iter().map(|(_, task)| task)
    }

    /// Owned copy of the tasks, in the order they are persisted
    pub fn to_tasks(&self) -> Vec<Task> {
        self.tasks().cloned().collect()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.entries
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, task)| task)
    }

    /// Zero-based position of a task in the store
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.entries.iter().position(|(tid, _)| *tid == id)
    }

    /// Id of the task at a zero-based position
    pub fn id_at(&self, index: usize) -> Option<TaskId> {
        self.entries.get(index).map(|(id, _)| *id)
    }
}
