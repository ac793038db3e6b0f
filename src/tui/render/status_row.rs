use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::util::unicode::display_width;

/// Key hints for the focused control
pub fn key_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Filter => "\u{2190}/\u{2192} filter  Tab next  ^S save & exit  Esc quit",
        Focus::Table => "\u{2191}/\u{2193} select  c done  d delete  ^S save & exit",
        f if f.is_input() => "Enter add  Tab next  ^S save & exit  Esc quit",
        _ => "Enter press  Tab next  ^S save & exit  Esc quit",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(msg) = &app.status_message {
        let fg = if msg.is_error {
            app.theme.red
        } else {
            app.theme.green
        };
        spans.push(Span::styled(format!(" {}", msg.text), Style::default().fg(fg).bg(bg)));
    } else if app.dirty {
        spans.push(Span::styled(
            " \u{25CF} unsaved",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    if app.show_key_hints {
        let hint = key_hints(app.focus);
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                format!("{} ", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
