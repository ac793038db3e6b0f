use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState};

use crate::tui::app::{App, Focus};
use crate::util::unicode::truncate_to_width;

const CATEGORY_W: u16 = 16;
const STATUS_W: u16 = 10;
const HIGHLIGHT_SYMBOL: &str = "\u{25B6} ";

/// Title | Category | Status, one row per visible task, tinted by completion
pub fn render_task_table(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let focused = app.focus == Focus::Table;
    let border = if focused { theme.highlight } else { theme.dim };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .title(Span::styled(
            format!(" Tasks \u{00B7} {} ", app.filter.label()),
            Style::default().fg(theme.text_bright).bg(bg),
        ))
        .style(Style::default().bg(bg));

    let visible = app.visible_tasks();
    if visible.is_empty() {
        let msg = if app.store.is_empty() {
            " No tasks yet. Fill in the form and press Enter."
        } else {
            " No tasks match this filter."
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            msg,
            Style::default().fg(theme.dim).bg(bg),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Inner width minus borders, highlight symbol, fixed columns and spacing
    let title_w = area
        .width
        .saturating_sub(2 + 2 + CATEGORY_W + STATUS_W + 2) as usize;

    let header = Row::new(vec!["Title", "Category", "Status"]).style(
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = visible
        .iter()
        .map(|(_, task)| {
            Row::new(vec![
                Cell::from(truncate_to_width(&task.title, title_w)),
                Cell::from(truncate_to_width(&task.category, CATEGORY_W as usize)),
                Cell::from(Span::styled(
                    task.status_label(),
                    Style::default().fg(theme.status_color(task.completed)),
                )),
            ])
            .style(Style::default().fg(theme.text).bg(theme.row_bg(task.completed)))
        })
        .collect();

    let selected_style = if focused {
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),
            Constraint::Length(CATEGORY_W),
            Constraint::Length(STATUS_W),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1)
    .row_highlight_style(selected_style)
    .highlight_symbol(HIGHLIGHT_SYMBOL)
    .highlight_spacing(HighlightSpacing::Always);

    let mut state = TableState::default().with_selected(app.selected_row());
    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::filter::Filter;
    use crate::tui::render::test_helpers::*;

    fn table_text(app: &App) -> String {
        render_to_string(TERM_W, 10, |frame, area| render_task_table(frame, app, area))
    }

    #[test]
    fn rows_show_title_category_and_status() {
        let app = sample_app();
        let out = table_text(&app);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].contains("Tasks \u{00B7} All"));
        assert!(lines[1].contains("Title"));
        assert!(lines[1].contains("Category"));
        assert!(lines[1].contains("Status"));
        assert!(lines[2].contains("Buy milk"));
        assert!(lines[2].contains("Personal"));
        assert!(lines[2].contains("\u{2714} Done"));
        assert!(lines[3].contains("Write report"));
        assert!(lines[3].contains("\u{2718} Pending"));
        assert!(lines[4].contains("Call mom"));
    }

    #[test]
    fn filter_hides_rows() {
        let mut app = sample_app();
        app.filter = Filter::Category("Work".into());
        let out = table_text(&app);
        assert!(out.contains("Write report"));
        assert!(!out.contains("Buy milk"));
        assert!(!out.contains("Call mom"));
    }

    #[test]
    fn selected_row_gets_marker() {
        let mut app = sample_app();
        app.set_focus(Focus::Table);
        app.move_selection(1);
        let out = table_text(&app);
        let marked: Vec<&str> = out.lines().filter(|l| l.contains(HIGHLIGHT_SYMBOL)).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Write report"));
    }

    #[test]
    fn filter_with_no_matches() {
        let mut app = sample_app();
        app.store = crate::model::TaskStore::from_tasks(vec![crate::model::Task::new(
            "Only", "", "Work",
        )]);
        app.filter = Filter::Completed;
        let out = table_text(&app);
        assert!(out.contains("No tasks match this filter."));
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut app = empty_app();
        app.store = crate::model::TaskStore::from_tasks(vec![crate::model::Task::new(
            "x".repeat(200),
            "",
            "Work",
        )]);
        let out = table_text(&app);
        assert!(out.contains('\u{2026}'));
    }
}
