pub mod form;
pub mod status_row;
pub mod task_table;
pub mod warning_popup;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Focus};

/// Main render function, top to bottom: heading, filter, inputs, table,
/// buttons, status row
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // heading
            Constraint::Length(1), // filter
            Constraint::Length(1), // spacer
            Constraint::Length(1), // title input
            Constraint::Length(1), // category input
            Constraint::Length(1), // description input
            Constraint::Length(1), // add button
            Constraint::Min(3),    // task table
            Constraint::Length(1), // action buttons
            Constraint::Length(1), // status row
        ])
        .split(area);

    form::render_heading(frame, app, chunks[0]);
    form::render_filter_row(frame, app, chunks[1]);
    form::render_field(frame, app, chunks[3], Focus::Title, "Title:");
    form::render_field(frame, app, chunks[4], Focus::Category, "Category:");
    form::render_field(frame, app, chunks[5], Focus::Description, "Description:");
    form::render_add_row(frame, app, chunks[6]);
    task_table::render_task_table(frame, app, chunks[7]);
    form::render_action_row(frame, app, chunks[8]);
    status_row::render_status_row(frame, app, chunks[9]);

    // Warning popup (rendered on top of everything)
    if app.warning.is_some() {
        warning_popup::render_warning_popup(frame, app, area);
    }
}
