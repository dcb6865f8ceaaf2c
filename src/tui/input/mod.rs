mod confirm;
mod edit;
mod form;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.message = None;

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Form => form::handle_form(app, key),
        Mode::EditStat(_) => edit::handle_stat_edit(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
    }
}
