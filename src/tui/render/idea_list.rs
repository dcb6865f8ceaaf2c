use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::idea::Idea;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{created_date, pad_to, spans_width};

/// Rows each idea occupies: title row + description row
const ROWS_PER_IDEA: usize = 2;

/// Width of the status column
const STATUS_COL: usize = 11;

/// Render the filtered idea list, scrolled so the cursor stays visible
pub fn render_idea_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.visible().is_empty() {
        let text = if app.session.ideas().is_empty() {
            " No ideas yet. Press a to add one."
        } else {
            " No ideas match the current filters."
        };
        let empty = Paragraph::new(text).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let per_page = (area.height as usize / ROWS_PER_IDEA).max(1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + per_page {
        app.scroll_offset = app.cursor + 1 - per_page;
    }

    let app: &App = app;
    let width = area.width as usize;
    let lines: Vec<Line> = app
        .visible()
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(per_page)
        .flat_map(|(i, idea)| idea_lines(app, idea, i == app.cursor, width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn idea_lines<'a>(app: &App, idea: &Idea, selected: bool, width: usize) -> [Line<'a>; 2] {
    let theme = &app.theme;
    let bg = if selected { theme.selection_bg } else { theme.background };
    let bg_style = Style::default().bg(bg);

    // Title row: marker, status, title ... category, priority
    let marker = if selected { "\u{258C}" } else { " " };
    let mut left = vec![
        Span::styled(marker, Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(
            format!("{:<width$}", idea.status.label(), width = STATUS_COL),
            Style::default().fg(theme.status_color(idea.status)).bg(bg),
        ),
    ];
    let right = vec![
        Span::styled(
            idea.category.label(),
            Style::default().fg(theme.category_color(idea.category)).bg(bg),
        ),
        Span::styled("  ", bg_style),
        Span::styled(
            format!("{:<6} ", idea.priority.label()),
            Style::default().fg(theme.priority_color(idea.priority)).bg(bg),
        ),
    ];
    let title_room = width.saturating_sub(spans_width(&left) + spans_width(&right) + 2);
    let mut title_style = Style::default().fg(theme.text_bright).bg(bg);
    if selected {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    left.push(Span::styled(
        unicode::truncate_to_width(&idea.title, title_room),
        title_style,
    ));
    pad_to(&mut left, width.saturating_sub(spans_width(&right)), bg_style);
    left.extend(right);

    // Description row: indented description ... created date
    let date = format!("{} ", created_date(&idea.created_at));
    let date_width = date.chars().count();
    let mut second = vec![Span::styled(" ".repeat(1 + STATUS_COL), bg_style)];
    let desc_room = width.saturating_sub(1 + STATUS_COL + date_width + 2);
    second.push(Span::styled(
        unicode::truncate_to_width(idea.description.lines().next().unwrap_or(""), desc_room),
        Style::default().fg(theme.text).bg(bg),
    ));
    pad_to(&mut second, width.saturating_sub(date_width), bg_style);
    second.push(Span::styled(date, Style::default().fg(theme.dim).bg(bg)));

    [Line::from(left), Line::from(second)]
}
