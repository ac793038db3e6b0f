use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, fit_to_width, scroll_start_for_cursor};

/// Width of the label column in front of inputs and the filter
const LABEL_W: u16 = 14;

pub const ADD_LABEL: &str = "\u{2795} Add Task";
pub const MARK_LABEL: &str = "\u{2705} Mark Completed";
pub const DELETE_LABEL: &str = "\u{274C} Delete Task";
pub const SAVE_LABEL: &str = "\u{1F4BE} Save & Exit";

fn label_span(label: &str, theme: &Theme) -> Span<'static> {
    let text = format!(" {}", label);
    Span::styled(
        fit_to_width(&text, LABEL_W as usize),
        Style::default().fg(theme.text).bg(theme.background),
    )
}

fn control_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.text_bright).bg(theme.selection_bg)
    } else {
        Style::default().fg(theme.text).bg(theme.field_bg)
    }
}

/// Heading on the left, task file on the right
pub fn render_heading(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let heading = " My To-Do List";
    let mut spans = vec![Span::styled(
        heading,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    let file = format!("{} ", app.task_file.display());
    let used = display_width(heading) + display_width(&file);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(file, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// `Filter:  ◀ Pending ▶   2 of 5`
pub fn render_filter_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Filter;
    let value = format!(" \u{25C0} {} \u{25B6} ", app.filter.label());
    let count = format!(
        "  {} of {}",
        app.visible_tasks().len(),
        app.store.len()
    );

    let line = Line::from(vec![
        label_span("Filter:", theme),
        Span::styled(value, control_style(theme, focused)),
        Span::styled(count, Style::default().fg(theme.dim).bg(theme.background)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.background)),
        area,
    );
}

/// One labelled input. The focused input scrolls to keep its cursor visible
/// and places the terminal cursor.
pub fn render_field(frame: &mut Frame, app: &App, area: Rect, focus: Focus, label: &str) {
    let Some(field) = app.field(focus) else {
        return;
    };
    let theme = &app.theme;
    let focused = app.focus == focus;
    let field_w = area.width.saturating_sub(LABEL_W + 1) as usize;

    let start = if focused {
        scroll_start_for_cursor(&field.value, field.cursor, field_w)
    } else {
        0
    };
    let shown = fit_to_width(&field.value[start..], field_w);

    let line = Line::from(vec![
        label_span(label, theme),
        Span::styled(shown, control_style(theme, focused)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.background)),
        area,
    );

    if focused && app.warning.is_none() && field_w > 0 {
        let offset = display_width(&field.value[start..field.cursor]).min(field_w - 1);
        frame.set_cursor_position((area.x + LABEL_W + offset as u16, area.y));
    }
}

fn button_span(label: &str, color: Color, focused: bool, theme: &Theme) -> Span<'static> {
    let mut style = Style::default()
        .fg(theme.button_text)
        .bg(color)
        .add_modifier(Modifier::BOLD);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!(" {} ", label), style)
}

pub fn render_add_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(" ".repeat(LABEL_W as usize), Style::default().bg(theme.background)),
        button_span(ADD_LABEL, theme.add_button, app.focus == Focus::Add, theme),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.background)),
        area,
    );
}

/// Mark Completed, Delete Task, Save & Exit
pub fn render_action_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let gap = || Span::styled("  ", Style::default().bg(theme.background));
    let line = Line::from(vec![
        Span::styled(" ", Style::default().bg(theme.background)),
        button_span(MARK_LABEL, theme.mark_button, app.focus == Focus::Mark, theme),
        gap(),
        button_span(DELETE_LABEL, theme.delete_button, app.focus == Focus::Delete, theme),
        gap(),
        button_span(SAVE_LABEL, theme.save_button, app.focus == Focus::Save, theme),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.background)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::filter::Filter;
    use crate::tui::render::test_helpers::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn filter_row_shows_label_and_count() {
        let mut app = sample_app();
        app.filter = Filter::Pending;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_filter_row(frame, &app, area)
        });
        assert!(out.contains("Filter:"));
        assert!(out.contains("\u{25C0} Pending \u{25B6}"));
        assert!(out.contains("2 of 3"));
    }

    #[test]
    fn field_shows_value() {
        let mut app = empty_app();
        for c in "Buy milk".chars() {
            app.title.insert_char(c);
        }
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_field(frame, &app, area, Focus::Title, "Title:")
        });
        assert!(out.starts_with(" Title:"));
        assert!(out.contains("Buy milk"));
    }

    #[test]
    fn long_field_scrolls_to_cursor() {
        let mut app = empty_app();
        for c in "abcdefghijklmnopqrstuvwxyz".chars() {
            app.title.insert_char(c);
        }
        let out = render_to_string(30, 1, |frame, area| {
            render_field(frame, &app, area, Focus::Title, "Title:")
        });
        // 15 cells for the value; the start scrolls off
        assert!(out.contains("xyz"));
        assert!(!out.contains("abc"));
    }

    #[test]
    fn focused_field_places_cursor() {
        let mut app = empty_app();
        for c in "milk".chars() {
            app.title.insert_char(c);
        }
        let backend = TestBackend::new(TERM_W, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_field(frame, &app, area, Focus::Title, "Title:");
            })
            .unwrap();
        let pos = terminal.get_cursor_position().unwrap();
        assert_eq!(pos.x, LABEL_W + 4);
        assert_eq!(pos.y, 0);
    }

    #[test]
    fn heading_shows_task_file() {
        let app = empty_app();
        let out = render_to_string(TERM_W, 1, |frame, area| render_heading(frame, &app, area));
        assert!(out.contains("My To-Do List"));
        assert!(out.ends_with("tasks.json"));
    }

    #[test]
    fn action_row_has_three_buttons() {
        let app = empty_app();
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_action_row(frame, &app, area)
        });
        assert!(out.contains("Mark Completed"));
        assert!(out.contains("Delete Task"));
        assert!(out.contains("Save & Exit"));
    }
}
