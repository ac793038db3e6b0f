//! Numbered, line-oriented terminal menu over the shared task store.
//!
//! Each turn prints the menu, reads one line, and runs the chosen action to
//! completion. Only the "Save & Exit" choice writes the task file; running
//! out of input ends the session without saving.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crossterm::style::{Color, Stylize};
use tracing::{error, warn};

use crate::io::store_io;
use crate::model::store::TaskStore;
use crate::model::task::Task;
use crate::ops::filter::partition_by_completion;
use crate::ops::task_ops::{self, TaskError};

/// How a menu session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// The user chose Save & Exit and the file was written
    Saved,
    /// Input ran out before Save & Exit; changes were discarded
    EndOfInput,
}

/// One menu choice, parsed from a line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ViewAll,
    MarkCompleted,
    Delete,
    SaveAndExit,
    ViewCompleted,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Option<MenuChoice> {
        match line.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::ViewAll),
            "3" => Some(MenuChoice::MarkCompleted),
            "4" => Some(MenuChoice::Delete),
            "5" => Some(MenuChoice::SaveAndExit),
            "6" => Some(MenuChoice::ViewCompleted),
            _ => None,
        }
    }
}

const MENU_ITEMS: [&str; 6] = [
    "1. Add Task",
    "2. View All Tasks",
    "3. Mark Task Completed",
    "4. Delete Task",
    "5. Save & Exit",
    "6. View Completed Tasks",
];

/// The menu loop, generic over its input and output streams
pub struct Menu<R, W> {
    input: R,
    out: W,
    color: bool,
    /// Store changed since the last successful save
    dirty: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W, color: bool) -> Self {
        Menu {
            input,
            out,
            color,
            dirty: false,
        }
    }

    /// Run until Save & Exit or end of input.
    pub fn run(&mut self, store: &mut TaskStore, path: &Path) -> io::Result<MenuExit> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                return self.end_of_input();
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                let msg = self.paint("\u{274C} Invalid option. Try again.", Color::Red);
                writeln!(self.out, "{msg}")?;
                continue;
            };

            let keep_going = match choice {
                MenuChoice::Add => self.add(store)?,
                MenuChoice::ViewAll => self.view_all(store)?,
                MenuChoice::MarkCompleted => self.mark_completed(store)?,
                MenuChoice::Delete => self.delete(store)?,
                MenuChoice::ViewCompleted => self.view_completed(store)?,
                MenuChoice::SaveAndExit => {
                    if self.save(store, path)? {
                        return Ok(MenuExit::Saved);
                    }
                    true
                }
            };
            if !keep_going {
                return self.end_of_input();
            }
        }
    }

    /// Consume the menu, handing back the output stream
    pub fn into_output(self) -> W {
        self.out
    }

    // -----------------------------------------------------------------------
    // Actions. Each returns Ok(false) when input ran out mid-action.
    // -----------------------------------------------------------------------

    fn add(&mut self, store: &mut TaskStore) -> io::Result<bool> {
        let Some(title) = self.prompt("Enter task title: ")? else {
            return Ok(false);
        };
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(false);
        };
        let Some(category) = self.prompt("Enter task category (e.g., Work, Personal): ")? else {
            return Ok(false);
        };

        let msg = match task_ops::add_task(store, &title, &description, &category) {
            Ok(_) => {
                self.dirty = true;
                self.paint("\u{2705} Task added!", Color::Green)
            }
            Err(TaskError::MissingTitle | TaskError::MissingCategory) => {
                self.paint("\u{274C} Title and category are required.", Color::Red)
            }
            Err(e) => self.paint(&format!("\u{274C} {e}"), Color::Red),
        };
        writeln!(self.out, "{msg}")?;
        Ok(true)
    }

    fn view_all(&mut self, store: &TaskStore) -> io::Result<bool> {
        let (pending, completed) = partition_by_completion(store);

        let header = self.paint("\n--- Incomplete Tasks ---", Color::Yellow);
        writeln!(self.out, "{header}")?;
        self.display_tasks(&pending)?;

        let header = self.paint("\n--- Completed Tasks ---", Color::Yellow);
        writeln!(self.out, "{header}")?;
        self.display_tasks(&completed)?;
        Ok(true)
    }

    fn view_completed(&mut self, store: &TaskStore) -> io::Result<bool> {
        let (_, completed) = partition_by_completion(store);
        if completed.is_empty() {
            let msg = self.paint("\u{274C} No tasks marked as completed.", Color::Red);
            writeln!(self.out, "{msg}")?;
        } else {
            let header = self.paint("\n--- Completed Tasks ---", Color::Yellow);
            writeln!(self.out, "{header}")?;
            self.display_tasks(&completed)?;
        }
        Ok(true)
    }

    fn mark_completed(&mut self, store: &mut TaskStore) -> io::Result<bool> {
        let all: Vec<&Task> = store.tasks().collect();
        self.display_tasks(&all)?;
        let Some(line) = self.prompt("Enter task number to mark completed: ")? else {
            return Ok(false);
        };

        let result = task_ops::parse_position(&line, store.len())
            .and_then(|index| task_ops::mark_completed_at(store, index).map(|t| t.title.clone()));
        let msg = match result {
            Ok(title) => {
                self.dirty = true;
                self.paint(
                    &format!("\u{2705} Task '{title}' marked as completed!"),
                    Color::Green,
                )
            }
            Err(_) => self.paint("\u{274C} Invalid task number.", Color::Red),
        };
        writeln!(self.out, "{msg}")?;
        Ok(true)
    }

    fn delete(&mut self, store: &mut TaskStore) -> io::Result<bool> {
        let all: Vec<&Task> = store.tasks().collect();
        self.display_tasks(&all)?;
        let Some(line) = self.prompt("Enter task number to delete: ")? else {
            return Ok(false);
        };

        let result = task_ops::parse_position(&line, store.len())
            .and_then(|index| task_ops::delete_task_at(store, index));
        let msg = match result {
            Ok(task) => {
                self.dirty = true;
                self.paint(
                    &format!("\u{1F5D1}\u{FE0F} Task '{}' deleted.", task.title),
                    Color::Red,
                )
            }
            Err(_) => self.paint("\u{274C} Invalid task number.", Color::Red),
        };
        writeln!(self.out, "{msg}")?;
        Ok(true)
    }

    /// Returns true when the file was written.
    fn save(&mut self, store: &TaskStore, path: &Path) -> io::Result<bool> {
        match store_io::save_store(path, store) {
            Ok(()) => {
                self.dirty = false;
                let msg = self.paint("\u{1F4C1} Tasks saved. Goodbye!", Color::Cyan);
                writeln!(self.out, "{msg}")?;
                Ok(true)
            }
            Err(e) => {
                error!(error = %e, "save failed");
                let msg = self.paint(&format!("\u{274C} Could not save: {e}"), Color::Red);
                writeln!(self.out, "{msg}")?;
                Ok(false)
            }
        }
    }

    fn end_of_input(&mut self) -> io::Result<MenuExit> {
        if self.dirty {
            warn!("input closed before Save & Exit, discarding unsaved changes");
            writeln!(self.out, "\nInput closed; unsaved changes were discarded.")?;
        }
        Ok(MenuExit::EndOfInput)
    }

    // -----------------------------------------------------------------------
    // Output helpers
    // -----------------------------------------------------------------------

    fn print_menu(&mut self) -> io::Result<()> {
        let header = self.paint("\n--- Personal To-Do List ---", Color::Yellow);
        writeln!(self.out, "{header}")?;
        for item in MENU_ITEMS {
            writeln!(self.out, "{item}")?;
        }
        Ok(())
    }

    /// Print a prompt and read one line. `None` means the input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD and fail validation downstream
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Numbered list: `1. [✔] Title - Category`, then the description line
    /// (blank when there is none).
    fn display_tasks(&mut self, tasks: &[&Task]) -> io::Result<()> {
        if tasks.is_empty() {
            writeln!(self.out, "  (none)")?;
            return Ok(());
        }
        for (i, task) in tasks.iter().enumerate() {
            let color = if task.completed { Color::Green } else { Color::Red };
            let glyph = self.paint(&task.status_glyph().to_string(), color);
            let title = self.paint(&task.title, color);
            writeln!(self.out, "{}. [{}] {} - {}", i + 1, glyph, title, task.category)?;
            let desc = if self.color {
                task.description.as_str().dim().to_string()
            } else {
                task.description.clone()
            };
            writeln!(self.out, "   {desc}")?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }
}
