use crossterm::event::{KeyCode, KeyEvent};

use crate::model::idea::{Category, Priority, Status};
use crate::tui::app::{App, FormField};
use crate::util::cycle;

use super::edit::edit_text;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => {
            let next = app.form_field.step(true);
            app.focus_form_field(next);
        }
        KeyCode::BackTab | KeyCode::Up => {
            let prev = app.form_field.step(false);
            app.focus_form_field(prev);
        }
        _ if app.form_field.is_text() => {
            if let Some((text, cursor)) = app.form_text_mut() {
                edit_text(text, cursor, key);
            }
        }
        KeyCode::Right | KeyCode::Char(' ') => cycle_choice(app, true),
        KeyCode::Left => cycle_choice(app, false),
        _ => {}
    }
}

/// Left/Right on a choice field
fn cycle_choice(app: &mut App, forward: bool) {
    let field = app.form_field;
    let draft = app.form.draft_mut();
    match field {
        FormField::Category => {
            draft.category = cycle::step(&Category::ALL, draft.category, forward)
        }
        FormField::Priority => {
            draft.priority = cycle::step(&Priority::ALL, draft.priority, forward)
        }
        FormField::Status => {
            draft.status = cycle::step(&Status::ALL, draft.status, forward)
        }
        FormField::Title | FormField::Description => {}
    }
}
