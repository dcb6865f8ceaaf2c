use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// The status and category selectors
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let selector_style = |active: bool| {
        if active {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        }
    };

    let status_active = app.status_filter != Default::default();
    let category_active = app.category_filter != Default::default();

    let spans = vec![
        Span::styled(" Status: ", label_style),
        Span::styled(app.status_filter.label(), selector_style(status_active)),
        Span::styled("   Category: ", label_style),
        Span::styled(app.category_filter.label(), selector_style(category_active)),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::idea::{Category, Status};
    use crate::ops::filter::{CategoryFilter, StatusFilter};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn default_selectors() {
        let app = app_with_ideas(vec![]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        insta::assert_snapshot!(output.trim_start(), @"Status: All Status   Category: All Categories");
    }

    #[test]
    fn active_selectors_use_labels() {
        let mut app = app_with_ideas(vec![]);
        app.status_filter = StatusFilter::Only(Status::Filming);
        app.category_filter = CategoryFilter::Only(Category::Gear);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        insta::assert_snapshot!(output.trim_start(), @"Status: Filming   Category: Gear Review");
    }
}
