use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};

/// Text entry for Title, Category and Description. Enter submits the form.
pub(super) fn handle_field(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.add_task();
        return;
    }
    let Some(field) = app.focused_field_mut() else {
        return;
    };
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => field.home(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => field.end(),
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => field.clear(),
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => field.delete_word_back(),
        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            field.delete_word_back()
        }
        (m, KeyCode::Char(c))
            if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
        {
            field.insert_char(c)
        }
        (_, KeyCode::Backspace) => field.backspace(),
        (_, KeyCode::Delete) => field.delete(),
        (_, KeyCode::Left) => field.move_left(),
        (_, KeyCode::Right) => field.move_right(),
        (_, KeyCode::Home) => field.home(),
        (_, KeyCode::End) => field.end(),
        _ => {}
    }
}

/// The filter selector: arrows step through the options
pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            app.cycle_filter(false)
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            app.cycle_filter(true)
        }
        _ => {}
    }
}

/// Add, Mark Completed, Delete Task and Save & Exit respond to Enter or Space
pub(super) fn handle_button(app: &mut App, key: KeyEvent) {
    if !matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
        return;
    }
    match app.focus {
        Focus::Add => app.add_task(),
        Focus::Mark => app.mark_completed(),
        Focus::Delete => app.delete_selected(),
        Focus::Save => app.save_and_exit(),
        _ => {}
    }
}
