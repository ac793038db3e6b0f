use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{AppConfig, Task, TaskStore};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an empty store with default config.
pub fn empty_app() -> App {
    App::new(
        TaskStore::default(),
        PathBuf::from("tasks.json"),
        &AppConfig::default(),
    )
}

/// Buy milk (Personal, done), Write report (Work), Call mom (Personal).
pub fn sample_app() -> App {
    let mut done = Task::new("Buy milk", "2%", "Personal");
    done.completed = true;
    let store = TaskStore::from_tasks(vec![
        done,
        Task::new("Write report", "", "Work"),
        Task::new("Call mom", "Sunday", "Personal"),
    ]);
    App::new(store, PathBuf::from("tasks.json"), &AppConfig::default())
}
