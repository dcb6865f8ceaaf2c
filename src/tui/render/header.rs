use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::{pad_to, spans_width};

/// Board name and idea counts, with a separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", Style::default().fg(app.theme.purple).bg(bg)),
        Span::styled(" ", bg_style),
        Span::styled(
            app.board.config.board.name.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let total = app.session.ideas().len();
    let shown = app.visible().len();
    let count = if shown == total {
        format!("{} ideas ", total)
    } else {
        format!("{} of {} ideas ", shown, total)
    };
    let count_width = count.chars().count();
    if spans_width(&spans) + count_width < width {
        pad_to(&mut spans, width - count_width, bg_style);
        spans.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let sep = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    frame.render_widget(Paragraph::new(Line::from(sep)), chunks[1]);
}
