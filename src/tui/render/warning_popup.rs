use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Modal warning, e.g. a missing title or category on Add
pub fn render_warning_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(warning) = &app.warning else {
        return;
    };
    let bg = app.theme.background;
    let highlight = app.theme.highlight;

    let content_w = display_width(&warning.message).max(display_width(&warning.title)) as u16;
    let popup_w = (content_w + 6).max(24).min(area.width.saturating_sub(2));
    let popup_h = 7.min(area.height.saturating_sub(2));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            warning.message.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " OK ",
            Style::default()
                .fg(app.theme.button_text)
                .bg(highlight)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(highlight).bg(bg))
        .title(Span::styled(
            format!(" \u{26A0} {} ", warning.title),
            Style::default()
                .fg(highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(bg));

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);
    frame.render_widget(paragraph, overlay_area);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
