use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::stats::StatField;
use crate::ops::stats_ops;
use crate::tui::app::{App, Mode};

use super::helpers::text_with_cursor;

/// Key that starts editing each field
fn edit_key(field: StatField) -> char {
    match field {
        StatField::WeeklyMiles => 'm',
        StatField::TotalVideos => 'v',
        StatField::Subscribers => 'u',
        StatField::AvgViews => 'w',
    }
}

/// One row: the four channel stats, the one being edited shown as an input
pub fn render_stats_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let stats = app.session.stats();

    let mut spans: Vec<Span> = vec![Span::styled(" ", label_style)];
    for (i, field) in StatField::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{2502} ", label_style));
        }
        spans.push(Span::styled(format!("{} ", field.label()), label_style));

        if app.mode == Mode::EditStat(field) {
            let edit_style = Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg);
            let cursor_style = Style::default()
                .fg(app.theme.highlight)
                .bg(app.theme.selection_bg);
            spans.extend(text_with_cursor(
                &app.edit_buffer,
                app.edit_cursor,
                edit_style,
                cursor_style,
            ));
        } else {
            spans.push(Span::styled(
                stats_ops::field_display(stats, field),
                value_style,
            ));
            spans.push(Span::styled(format!(" {}", edit_key(field)), label_style));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
