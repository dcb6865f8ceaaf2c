use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Apply a single-line editing key to `text`. Other keys leave both the
/// text and the cursor alone.
pub(super) fn edit_text(text: &mut String, cursor: &mut usize, key: KeyEvent) {
    *cursor = (*cursor).min(text.len());
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('a') if key.modifiers == KeyModifiers::CONTROL => *cursor = 0,
        KeyCode::Char('e') if key.modifiers == KeyModifiers::CONTROL => *cursor = text.len(),
        KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
            text.replace_range(..*cursor, "");
            *cursor = 0;
        }
        KeyCode::Char(c) if plain => {
            text.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_grapheme_boundary(text, *cursor) {
                text.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_grapheme_boundary(text, *cursor) {
                text.replace_range(*cursor..next, "");
            }
        }
        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(text, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(text, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = text.len(),
        _ => {}
    }
}

pub(super) fn handle_stat_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_stat_edit(),
        KeyCode::Esc => app.cancel_stat_edit(),
        _ => edit_text(&mut app.edit_buffer, &mut app.edit_cursor, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn insert_in_the_middle() {
        let mut text = String::from("5k race");
        let mut cursor = 2;
        edit_text(&mut text, &mut cursor, key(KeyCode::Char('m')));
        assert_eq!(text, "5km race");
        assert_eq!(cursor, 3);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut text = String::from("run 🏃");
        let mut cursor = text.len();
        edit_text(&mut text, &mut cursor, key(KeyCode::Backspace));
        assert_eq!(text, "run ");
        assert_eq!(cursor, 4);
    }

    #[test]
    fn ctrl_u_clears_to_start() {
        let mut text = String::from("1.2k subs");
        let mut cursor = 4;
        edit_text(
            &mut text,
            &mut cursor,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(text, " subs");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn non_edit_keys_change_nothing() {
        let mut text = String::from("tempo");
        let mut cursor = 2;
        edit_text(&mut text, &mut cursor, key(KeyCode::Tab));
        edit_text(
            &mut text,
            &mut cursor,
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT),
        );
        assert_eq!(text, "tempo");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn cursor_past_end_is_clamped_before_editing() {
        let mut text = String::from("10k");
        let mut cursor = 99;
        edit_text(&mut text, &mut cursor, key(KeyCode::Char('m')));
        assert_eq!(text, "10km");
        assert_eq!(cursor, 4);
    }
}
