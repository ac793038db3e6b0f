mod form;
mod table;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};

/// Main key dispatch: the warning popup, then global keys, then the focused control
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Warning popup intercepts all input
    if app.warning.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_warning();
        }
        return;
    }

    if handle_global(app, key) {
        return;
    }

    match app.focus {
        Focus::Filter => form::handle_filter(app, key),
        Focus::Table => table::handle_table(app, key),
        focus if focus.is_input() => form::handle_field(app, key),
        focus if focus.is_button() => form::handle_button(app, key),
        _ => {}
    }
}

/// Keys that mean the same thing wherever focus is. Returns true if consumed.
fn handle_global(app: &mut App, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => app.save_and_exit(),
        // Raw mode delivers Ctrl-C as a key, so treat it as closing the window
        (m, KeyCode::Char('q') | KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.quit_without_saving()
        }
        (_, KeyCode::Esc) => app.quit_without_saving(),
        (_, KeyCode::BackTab) => app.focus_prev(),
        (m, KeyCode::Tab) if m.contains(KeyModifiers::SHIFT) => app.focus_prev(),
        (_, KeyCode::Tab) => app.focus_next(),
        _ => return false,
    }
    true
}
