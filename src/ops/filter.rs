use std::fmt;

use indexmap::IndexSet;

use crate::model::store::TaskStore;
use crate::model::task::{Task, TaskId};

/// Which tasks a view shows. Never changes the store itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
    /// Exact, case-sensitive category match
    Category(String),
}

impl Filter {
    /// Interpret a filter label. The three built-in names win over a
    /// category that happens to share the name.
    pub fn parse(s: &str) -> Filter {
        match s {
            "All" => Filter::All,
            "Completed" => Filter::Completed,
            "Pending" => Filter::Pending,
            other => Filter::Category(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => "All",
            Filter::Completed => "Completed",
            Filter::Pending => "Pending",
            Filter::Category(c) => c,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
            Filter::Category(c) => task.category == *c,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tasks passing the filter, in store order, with their ids
pub fn filter_tasks<'a>(store: &'a TaskStore, filter: &Filter) -> Vec<(TaskId, &'a Task)> {
    store
        .entries()
        .iter()
        .filter(|(_, task)| filter.matches(task))
        .map(|(id, task)| (*id, task))
        .collect()
}

/// Distinct categories in order of first appearance.
/// Derived from the live store on every call.
pub fn categories(store: &TaskStore) -> Vec<&str> {
    let set: IndexSet<&str> = store.tasks().map(|t| t.category.as_str()).collect();
    set.into_iter().collect()
}

/// Every filter a user can pick right now: the built-ins, then one per category.
pub fn filter_options(store: &TaskStore) -> Vec<Filter> {
    let mut options = vec![Filter::All, Filter::Completed, Filter::Pending];
    for category in categories(store) {
        let filter = Filter::parse(category);
        if !options.contains(&filter) {
            options.push(filter);
        }
    }
    options
}

/// Split into (pending, completed), each keeping store order
pub fn partition_by_completion(store: &TaskStore) -> (Vec<&Task>, Vec<&Task>) {
    store.tasks().partition(|t| !t.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::task_ops::{add_task, mark_completed_at};
    use pretty_assertions::assert_eq;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::default();
        add_task(&mut store, "Buy milk", "2%", "Personal").unwrap();
        add_task(&mut store, "Write report", "", "Work").unwrap();
        add_task(&mut store, "Book flights", "", "Personal").unwrap();
        add_task(&mut store, "Review PR", "", "work").unwrap();
        mark_completed_at(&mut store, 0).unwrap();
        mark_completed_at(&mut store, 3).unwrap();
        store
    }

    fn titles(tasks: &[(TaskId, &Task)]) -> Vec<String> {
        tasks.iter().map(|(_, t)| t.title.clone()).collect()
    }

    #[test]
    fn all_shows_everything() {
        let store = sample_store();
        assert_eq!(filter_tasks(&store, &Filter::All).len(), 4);
    }

    #[test]
    fn completed_is_ordered_subsequence() {
        let store = sample_store();
        assert_eq!(
            titles(&filter_tasks(&store, &Filter::Completed)),
            vec!["Buy milk", "Review PR"]
        );
    }

    #[test]
    fn pending_is_ordered_subsequence() {
        let store = sample_store();
        assert_eq!(
            titles(&filter_tasks(&store, &Filter::Pending)),
            vec!["Write report", "Book flights"]
        );
    }

    #[test]
    fn category_match_is_exact_and_case_sensitive() {
        let store = sample_store();
        assert_eq!(
            titles(&filter_tasks(&store, &Filter::Category("Personal".into()))),
            vec!["Buy milk", "Book flights"]
        );
        assert_eq!(
            titles(&filter_tasks(&store, &Filter::Category("Work".into()))),
            vec!["Write report"]
        );
        assert!(filter_tasks(&store, &Filter::Category("Pers".into())).is_empty());
    }

    #[test]
    fn filter_ids_point_back_into_store() {
        let store = sample_store();
        for (id, task) in filter_tasks(&store, &Filter::Pending) {
            assert_eq!(store.get(id), Some(task));
        }
    }

    #[test]
    fn parse_and_label() {
        assert_eq!(Filter::parse("All"), Filter::All);
        assert_eq!(Filter::parse("Completed"), Filter::Completed);
        assert_eq!(Filter::parse("Pending"), Filter::Pending);
        assert_eq!(Filter::parse("pending"), Filter::Category("pending".into()));
        assert_eq!(Filter::Category("Work".into()).to_string(), "Work");
    }

    #[test]
    fn categories_in_first_appearance_order() {
        let store = sample_store();
        assert_eq!(categories(&store), vec!["Personal", "Work", "work"]);
    }

    #[test]
    fn options_start_with_builtins() {
        let mut store = sample_store();
        add_task(&mut store, "Odd one", "", "Pending").unwrap();
        let labels: Vec<String> = filter_options(&store)
            .iter()
            .map(|f| f.label().to_string())
            .collect();
        assert_eq!(
            labels,
            vec!["All", "Completed", "Pending", "Personal", "Work", "work"]
        );
    }

    #[test]
    fn partition_keeps_order() {
        let store = sample_store();
        let (pending, done) = partition_by_completion(&store);
        let p: Vec<&str> = pending.iter().map(|t| t.title.as_str()).collect();
        let d: Vec<&str> = done.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(p, vec!["Write report", "Book flights"]);
        assert_eq!(d, vec!["Buy milk", "Review PR"]);
    }
}
