pub mod filter_bar;
pub mod form_panel;
pub mod header;
pub mod helpers;
pub mod idea_list;
pub mod stats_bar;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let form_height = if app.form.is_open() {
        form_panel::FORM_HEIGHT
    } else {
        0
    };

    // Layout: header (2 rows) | stats | filters | list | form | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // board name + separator
            Constraint::Length(1),           // stats
            Constraint::Length(1),           // filter selectors
            Constraint::Min(1),              // idea list
            Constraint::Length(form_height), // new idea panel
            Constraint::Length(1),           // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    stats_bar::render_stats_bar(frame, app, chunks[1]);
    filter_bar::render_filter_bar(frame, app, chunks[2]);
    idea_list::render_idea_list(frame, app, chunks[3]);
    if app.form.is_open() {
        form_panel::render_form_panel(frame, app, chunks[4]);
    }
    status_row::render_status_row(frame, app, chunks[5]);
}
