use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::idea::Status;
use crate::model::stats::StatField;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }

        // Movement
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(true),
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(false),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible().len().saturating_sub(1);
        }

        // Filters
        (_, KeyCode::Char('s')) => app.cycle_status_filter(true),
        (_, KeyCode::Char('S')) => app.cycle_status_filter(false),
        (_, KeyCode::Char('c')) => app.cycle_category_filter(true),
        (_, KeyCode::Char('C')) => app.cycle_category_filter(false),

        // Status
        (_, KeyCode::Char(' ') | KeyCode::Enter) => app.advance_status(),
        (_, KeyCode::Char(c @ '1'..='6')) => {
            let idx = (c as u8 - b'1') as usize;
            app.set_status(Status::ALL[idx]);
        }

        (_, KeyCode::Char('d')) => app.request_delete(),
        (_, KeyCode::Char('a')) => app.toggle_form(),

        // Stats
        (_, KeyCode::Char('m')) => app.begin_stat_edit(StatField::WeeklyMiles),
        (_, KeyCode::Char('v')) => app.begin_stat_edit(StatField::TotalVideos),
        (_, KeyCode::Char('u')) => app.begin_stat_edit(StatField::Subscribers),
        (_, KeyCode::Char('w')) => app.begin_stat_edit(StatField::AvgViews),

        _ => {}
    }
}
