use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, FormField, Mode};

use super::helpers::text_with_cursor;

/// Height of the panel: one row per field plus borders
pub const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 2;

const LABEL_COL: usize = 13;

/// The "new idea" panel below the list
pub fn render_form_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let focused_panel = app.mode == Mode::Form;
    let draft = app.form.draft();

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = focused_panel && field == app.form_field;
        let label_style = if focused {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        let value_style = Style::default().fg(theme.text_bright).bg(bg);

        let mut spans = vec![Span::styled(
            format!(" {:<width$}", field.label(), width = LABEL_COL - 1),
            label_style,
        )];

        match field {
            FormField::Title | FormField::Description => {
                let text = if field == FormField::Title {
                    &draft.title
                } else {
                    &draft.description
                };
                if focused {
                    let cursor_style = Style::default().fg(theme.highlight).bg(bg);
                    spans.extend(text_with_cursor(text, app.edit_cursor, value_style, cursor_style));
                } else if text.is_empty() && field == FormField::Title {
                    spans.push(Span::styled("(required)", Style::default().fg(theme.dim).bg(bg)));
                } else {
                    spans.push(Span::styled(text.clone(), value_style));
                }
            }
            FormField::Category | FormField::Priority | FormField::Status => {
                let (label, color) = match field {
                    FormField::Category => {
                        (draft.category.label(), theme.category_color(draft.category))
                    }
                    FormField::Priority => {
                        (draft.priority.label(), theme.priority_color(draft.priority))
                    }
                    _ => (draft.status.label(), theme.status_color(draft.status)),
                };
                let (open, close) = if focused {
                    ("\u{2039} ", " \u{203A}") // ‹ ›
                } else {
                    ("", "")
                };
                spans.push(Span::styled(open, label_style));
                spans.push(Span::styled(label, Style::default().fg(color).bg(bg)));
                spans.push(Span::styled(close, label_style));
            }
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused_panel { theme.highlight } else { theme.dim }))
        .title(" New Idea ")
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
