use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::repository::{KvRepository, Repository};
use crate::io::store::{IDEAS_KEY, MemoryStore};
use crate::model::board::Board;
use crate::model::config::{BoardConfig, BoardInfo};
use crate::model::idea::{Category, Idea, Priority, Status};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A board whose directory does not exist; nothing here touches disk.
pub fn test_board() -> Board {
    Board {
        root: PathBuf::from("/nonexistent/storyboard-test"),
        board_dir: PathBuf::from("/nonexistent/storyboard-test/storyboard"),
        config: BoardConfig {
            board: BoardInfo {
                name: "Trail Miles".into(),
            },
            form: Default::default(),
            ui: Default::default(),
        },
    }
}

/// An idea with medium priority, status `idea`, created 2024-05-14.
pub fn idea(id: &str, title: &str, category: Category) -> Idea {
    Idea {
        id: id.into(),
        title: title.into(),
        description: String::new(),
        category,
        priority: Priority::Medium,
        status: Status::Idea,
        created_at: "2024-05-14T12:00:00.000Z".into(),
    }
}

/// An App over an in-memory store holding `ideas` (newest first).
pub fn app_with_ideas(ideas: Vec<Idea>) -> App {
    let mut store = MemoryStore::new();
    if !ideas.is_empty() {
        let json = serde_json::to_string(&ideas).unwrap();
        store = store.with_entry(IDEAS_KEY, &json);
    }
    let repo: Box<dyn Repository> = Box::new(KvRepository::new(store));
    App::new(test_board(), repo)
}
