use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::model::store::TaskStore;
use crate::model::task::Task;

/// Error type for task file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("serialized tasks are not UTF-8: {0}")]
    Encoding(std::str::Utf8Error),
}

/// Read the task file. A missing file is an empty list; anything that exists
/// but is not a JSON array of tasks is an error.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "task file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let tasks: Vec<Task> = serde_json::from_str(&text).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
    Ok(tasks)
}

/// Write the full task list, replacing whatever the file held before.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let content = to_json(tasks)?;
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), count = tasks.len(), "saved tasks");
    Ok(())
}

/// Load the task file straight into a store
pub fn load_store(path: &Path) -> Result<TaskStore, StoreError> {
    load_tasks(path).map(TaskStore::from_tasks)
}

/// Persist every task in the store, in store order
pub fn save_store(path: &Path, store: &TaskStore) -> Result<(), StoreError> {
    save_tasks(path, &store.to_tasks())
}

/// Serialize tasks as a JSON array with 4-space indentation
pub fn to_json(tasks: &[Task]) -> Result<String, StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tasks.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| StoreError::Encoding(e.utf8_error()))
}

/// Write through a temp file in the same directory, then rename over the target.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Vec<Task> {
        let mut done = Task::new("Buy milk", "2%", "Personal");
        done.completed = true;
        vec![done, Task::new("Write report", "", "Work")]
    }

    #[test]
    fn missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let tasks = load_tasks(&tmp.path().join("nope.json")).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        save_tasks(&path, &sample()).unwrap();
        assert_eq!(load_tasks(&path).unwrap(), sample());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        save_tasks(&path, &sample()).unwrap();
        save_tasks(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(load_tasks(&path).unwrap().is_empty());
    }

    #[test]
    fn file_format_uses_four_space_indent() {
        let json = to_json(&[Task::new("a", "b", "c")]).unwrap();
        assert_eq!(
            json,
            "[\n    {\n        \"title\": \"a\",\n        \"description\": \"b\",\n        \"category\": \"c\",\n        \"completed\": false\n    }\n]"
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        fs::write(&path, "not json {{{").unwrap();
        let err = load_tasks(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().starts_with("could not parse"));
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        fs::write(&path, r#"{"title": "not an array"}"#).unwrap();
        assert!(matches!(
            load_tasks(&path),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn reads_file_written_by_hand() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        fs::write(
            &path,
            r#"[
    {"title": "Call mom", "description": "", "category": "Family", "completed": true},
    {"title": "Gym", "description": "legs", "category": "Health"}
]"#,
        )
        .unwrap();
        let store = load_store(&path).unwrap();
        assert_eq!(store.len(), 2);
        let tasks = store.to_tasks();
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
        assert_eq!(tasks[1].description, "legs");
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no/such/dir/tasks.json");
        assert!(matches!(
            save_tasks(&path, &sample()),
            Err(StoreError::Write { .. })
        ));
    }
}
