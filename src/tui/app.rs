use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, error, info, warn};

use crate::io::store_io;
use crate::model::{AppConfig, Task, TaskId, TaskStore};
use crate::ops::filter::{self, Filter};
use crate::ops::task_ops;
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

pub const WINDOW_TITLE: &str = "\u{2728} Personal To-Do List";

/// Which control receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filter,
    Title,
    Category,
    Description,
    Add,
    Table,
    Mark,
    Delete,
    Save,
}

impl Focus {
    /// Tab order
    pub const ORDER: [Focus; 9] = [
        Focus::Filter,
        Focus::Title,
        Focus::Category,
        Focus::Description,
        Focus::Add,
        Focus::Table,
        Focus::Mark,
        Focus::Delete,
        Focus::Save,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Focus {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }

    pub fn is_input(self) -> bool {
        matches!(self, Focus::Title | Focus::Category | Focus::Description)
    }

    pub fn is_button(self) -> bool {
        matches!(self, Focus::Add | Focus::Mark | Focus::Delete | Focus::Save)
    }
}

/// Single-line text input. `cursor` is a byte offset on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.value.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.value.drain(self.cursor..next);
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.value, self.cursor);
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Blocking warning dialog; swallows keys until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub title: String,
    pub message: String,
}

/// One-line message in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub task_file: PathBuf,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub focus: Focus,
    pub title: InputField,
    pub category: InputField,
    pub description: InputField,
    pub filter: Filter,
    /// Selected task; follows the task, not the row
    pub selected: Option<TaskId>,
    pub warning: Option<Warning>,
    pub status_message: Option<StatusMessage>,
    /// Unsaved mutations since load
    pub dirty: bool,
    pub saved: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, task_file: PathBuf, config: &AppConfig) -> Self {
        App {
            store,
            task_file,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            focus: Focus::Title,
            title: InputField::default(),
            category: InputField::default(),
            description: InputField::default(),
            filter: Filter::All,
            selected: None,
            warning: None,
            status_message: None,
            dirty: false,
            saved: false,
            should_quit: false,
        }
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Rows of the table under the active filter, in store order
    pub fn visible_tasks(&self) -> Vec<(TaskId, &Task)> {
        filter::filter_tasks(&self.store, &self.filter)
    }

    /// All, Completed, Pending, then categories in first-appearance order
    pub fn filter_options(&self) -> Vec<Filter> {
        filter::filter_options(&self.store)
    }

    /// Visible row of the selected task, if it is shown
    pub fn selected_row(&self) -> Option<usize> {
        let id = self.selected?;
        self.visible_tasks().iter().position(|(vid, _)| *vid == id)
    }

    pub fn field(&self, focus: Focus) -> Option<&InputField> {
        match focus {
            Focus::Title => Some(&self.title),
            Focus::Category => Some(&self.category),
            Focus::Description => Some(&self.description),
            _ => None,
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        match self.focus {
            Focus::Title => Some(&mut self.title),
            Focus::Category => Some(&mut self.category),
            Focus::Description => Some(&mut self.description),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Focus and selection
    // -----------------------------------------------------------------------

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if focus == Focus::Table && self.selected_row().is_none() {
            self.selected = self.visible_tasks().first().map(|(id, _)| *id);
        }
    }

    /// Move the selection by `delta` rows, clamped to the table
    pub fn move_selection(&mut self, delta: isize) {
        let ids: Vec<TaskId> = self.visible_tasks().iter().map(|(id, _)| *id).collect();
        if ids.is_empty() {
            self.selected = None;
            return;
        }
        let row = match self.selected_row() {
            Some(row) => row.saturating_add_signed(delta).min(ids.len() - 1),
            None => 0,
        };
        self.selected = Some(ids[row]);
    }

    pub fn select_first(&mut self) {
        self.selected = self.visible_tasks().first().map(|(id, _)| *id);
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_tasks().last().map(|(id, _)| *id);
    }

    /// After a mutation: keep the selected task if still shown, otherwise take
    /// the row now at `prev_row` (or the last row), or nothing.
    fn reselect(&mut self, prev_row: Option<usize>) {
        if self.selected_row().is_some() {
            return;
        }
        let visible = self.visible_tasks();
        self.selected = match prev_row {
            Some(row) if !visible.is_empty() => Some(visible[row.min(visible.len() - 1)].0),
            _ => None,
        };
    }

    /// Fall back to All when the active category names no task any more
    fn sync_filter(&mut self) {
        if let Filter::Category(name) = &self.filter
            && !filter::categories(&self.store).contains(&name.as_str())
        {
            debug!(category = %name, "category filter emptied, showing all");
            self.filter = Filter::All;
        }
    }

    /// Step through the filter options, wrapping at both ends
    pub fn cycle_filter(&mut self, forward: bool) {
        let options = self.filter_options();
        let current = options.iter().position(|f| *f == self.filter).unwrap_or(0);
        let len = options.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.filter = options[next].clone();
        if self.selected_row().is_none() {
            self.selected = None;
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Add a task from the three inputs; warns and leaves everything untouched
    /// when title or category is missing.
    pub fn add_task(&mut self) {
        let description = self.description.value.trim().to_string();
        match task_ops::add_task(
            &mut self.store,
            &self.title.value,
            &description,
            &self.category.value,
        ) {
            Ok(_) => {
                self.status_message = Some(StatusMessage {
                    text: format!("Added '{}'", self.title.value),
                    is_error: false,
                });
                self.title.clear();
                self.category.clear();
                self.description.clear();
                self.dirty = true;
            }
            Err(e) => {
                debug!(error = %e, "add rejected");
                self.warning = Some(Warning {
                    title: "Missing Data".into(),
                    message: "Title and Category are required.".into(),
                });
            }
        }
    }

    /// Mark the selected task completed; no-op without a selection
    pub fn mark_completed(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let prev_row = self.selected_row();
        if let Ok(true) = task_ops::mark_completed(&mut self.store, id)
            && let Some(task) = self.store.get(id)
        {
            self.status_message = Some(StatusMessage {
                text: format!("Completed '{}'", task.title),
                is_error: false,
            });
            self.dirty = true;
        }
        self.reselect(prev_row);
    }

    /// Delete the selected task; the selection moves to the row that takes its place
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let prev_row = self.selected_row();
        if let Ok(task) = task_ops::delete_task(&mut self.store, id) {
            self.status_message = Some(StatusMessage {
                text: format!("Deleted '{}'", task.title),
                is_error: false,
            });
            self.dirty = true;
        }
        self.sync_filter();
        self.reselect(prev_row);
    }

    /// Persist and end the loop. A failed save keeps the UI open.
    pub fn save_and_exit(&mut self) {
        match store_io::save_store(&self.task_file, &self.store) {
            Ok(()) => {
                info!(file = %self.task_file.display(), tasks = self.store.len(), "saved");
                self.dirty = false;
                self.saved = true;
                self.should_quit = true;
            }
            Err(e) => {
                error!(error = %e, "save failed");
                self.status_message = Some(StatusMessage {
                    text: e.to_string(),
                    is_error: true,
                });
            }
        }
    }

    /// Close without persisting
    pub fn quit_without_saving(&mut self) {
        if self.dirty {
            warn!("closing with unsaved changes; they are discarded");
        }
        self.should_quit = true;
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }
}

// ---------------------------------------------------------------------------
// Terminal lifecycle
// ---------------------------------------------------------------------------

/// Open the form UI on `task_file` and run until Save & Exit or quit
pub fn run(task_file: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Load before taking over the terminal so errors print normally
    let store = store_io::load_store(task_file)?;
    let mut app = App::new(store, task_file.to_path_buf(), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !app.saved && app.dirty {
        eprintln!("Changes discarded.");
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
