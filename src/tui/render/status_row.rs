use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

fn hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => {
            "a add  space next status  1-6 set status  d delete  s/c filter  m/v/u/w stats  q quit"
        }
        Mode::Form => "Tab next field  \u{2190}/\u{2192} change  Enter save  Esc cancel",
        Mode::EditStat(_) => "Enter save  Esc cancel",
        Mode::Confirm => "y delete  n keep",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if app.mode == Mode::Confirm {
        let title = app
            .pending_delete
            .as_deref()
            .and_then(|id| app.session.find(id))
            .map(|i| i.title.as_str())
            .unwrap_or("");
        let prompt = format!(" Delete \"{}\"? ", title);
        Line::from(vec![
            Span::styled(
                unicode::truncate_to_width(&prompt, width.saturating_sub(18)),
                Style::default().fg(app.theme.red).bg(bg),
            ),
            Span::styled(hint(app.mode), Style::default().fg(app.theme.dim).bg(bg)),
        ])
    } else if let Some(message) = &app.message {
        Line::from(Span::styled(
            unicode::truncate_to_width(&format!(" {}", message), width),
            Style::default().fg(app.theme.yellow).bg(bg),
        ))
    } else {
        Line::from(Span::styled(
            unicode::truncate_to_width(&format!(" {}", hint(app.mode)), width),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
