use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::cli::handlers::resolve_start;
use crate::io::board_io::{find_board, open_repository};
use crate::io::lock::BoardLock;
use crate::io::recovery;
use crate::io::repository::Repository;
use crate::io::store::StoreError;
use crate::io::watcher::StoreWatcher;
use crate::model::board::Board;
use crate::model::idea::{Idea, Status};
use crate::model::stats::StatField;
use crate::ops::filter::{CategoryFilter, StatusFilter};
use crate::ops::form::FormController;
use crate::ops::stats_ops;
use crate::session::Session;
use crate::util::cycle;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// The "new idea" panel has focus
    Form,
    /// Typing a new value for one stats field
    EditStat(StatField),
    /// Waiting for `y` to delete the idea in `pending_delete`
    Confirm,
}

/// Field of the form panel that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
    Priority,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::Priority,
        FormField::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::Priority => "Priority",
            FormField::Status => "Status",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Title | FormField::Description)
    }

    /// Next (or previous) field, wrapping
    pub fn step(self, forward: bool) -> FormField {
        cycle::step(&Self::ALL, self, forward)
    }
}

/// Main application state
pub struct App {
    pub board: Board,
    pub session: Session<Box<dyn Repository>>,
    pub form: FormController,
    pub form_field: FormField,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub status_filter: StatusFilter,
    pub category_filter: CategoryFilter,
    /// Cursor index into the visible (filtered) list
    pub cursor: usize,
    /// First visible idea in the list area
    pub scroll_offset: usize,
    /// Text being typed in EditStat mode, or the focused text field of the form
    pub edit_buffer: String,
    /// Byte offset of the text cursor in the field being edited
    pub edit_cursor: usize,
    pub pending_delete: Option<String>,
    /// One-line notice for the status row; cleared on the next key press
    pub message: Option<String>,
}

impl App {
    pub fn new(board: Board, repo: Box<dyn Repository>) -> Self {
        let theme = Theme::from_config(&board.config.ui);
        let form = FormController::new(&board.config.form);
        App {
            session: Session::open(repo),
            form,
            form_field: FormField::Title,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            status_filter: StatusFilter::All,
            category_filter: CategoryFilter::All,
            cursor: 0,
            scroll_offset: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            pending_delete: None,
            message: None,
            board,
        }
    }

    /// Ideas passing both filters, newest first
    pub fn visible(&self) -> Vec<&Idea> {
        self.session.visible(self.status_filter, self.category_filter)
    }

    pub fn selected_idea(&self) -> Option<&Idea> {
        self.visible().get(self.cursor).copied()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected_idea().map(|i| i.id.clone())
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.visible().len();
        self.cursor = if count == 0 { 0 } else { self.cursor.min(count - 1) };
    }

    /// Put the cursor on `id` if it is visible; otherwise just clamp
    pub fn select_id(&mut self, id: Option<&str>) {
        if let Some(id) = id
            && let Some(pos) = self.visible().iter().position(|i| i.id == id)
        {
            self.cursor = pos;
            return;
        }
        self.clamp_cursor();
    }

    pub fn move_cursor(&mut self, down: bool) {
        let count = self.visible().len();
        if count == 0 {
            return;
        }
        self.cursor = if down {
            (self.cursor + 1).min(count - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    pub fn cycle_status_filter(&mut self, forward: bool) {
        let keep = self.selected_id();
        self.status_filter = self.status_filter.cycle(forward);
        self.select_id(keep.as_deref());
    }

    pub fn cycle_category_filter(&mut self, forward: bool) {
        let keep = self.selected_id();
        self.category_filter = self.category_filter.cycle(forward);
        self.select_id(keep.as_deref());
    }

    // -----------------------------------------------------------------------
    // Writes (each one takes the board lock and reloads before it mutates)
    // -----------------------------------------------------------------------

    fn lock(&mut self) -> Option<BoardLock> {
        match BoardLock::acquire_default(&self.board.board_dir) {
            Ok(lock) => Some(lock),
            Err(e) => {
                self.message = Some(format!("warning: {}", e));
                None
            }
        }
    }

    /// Lock the board and take in whatever is on disk now, so the write that
    /// follows lands on top of changes made by another process
    fn begin_write(&mut self) -> Option<BoardLock> {
        let lock = self.lock();
        self.reload_from_disk();
        lock
    }

    fn report_write_error(&mut self, e: StoreError) {
        self.message = Some(format!("save failed: {} (see sb recovery)", e));
    }

    pub fn set_status(&mut self, status: Status) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let _lock = self.begin_write();
        match self.session.update_status(&id, status) {
            Ok(true) => {}
            Ok(false) => self.message = Some("idea was removed elsewhere".into()),
            Err(e) => self.report_write_error(e),
        }
        // A status filter may hide the idea now
        self.select_id(Some(&id));
    }

    pub fn advance_status(&mut self) {
        if let Some(status) = self.selected_idea().map(|i| i.status.next()) {
            self.set_status(status);
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            self.pending_delete = Some(id);
            self.mode = Mode::Confirm;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.mode = Mode::Navigate;
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        let _lock = self.begin_write();
        match self.session.delete(&id) {
            Ok(Some(idea)) => {
                recovery::log_idea_deletion(&self.board.board_dir, &idea);
                self.message = Some(format!("deleted \"{}\"", idea.title));
            }
            Ok(None) => self.message = Some("idea was removed elsewhere".into()),
            Err(e) => self.report_write_error(e),
        }
        self.clamp_cursor();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Form
    // -----------------------------------------------------------------------

    /// Show the panel (keeping any unfinished draft) or hide it
    pub fn toggle_form(&mut self) {
        self.form.toggle();
        if self.form.is_open() {
            self.mode = Mode::Form;
            self.focus_form_field(FormField::Title);
        } else {
            self.mode = Mode::Navigate;
        }
    }

    /// Move focus, placing the text cursor at the end of a text field
    pub fn focus_form_field(&mut self, field: FormField) {
        self.form_field = field;
        self.edit_cursor = match field {
            FormField::Title => self.form.draft().title.len(),
            FormField::Description => self.form.draft().description.len(),
            _ => 0,
        };
    }

    /// The draft string the focused text field edits, with its cursor
    pub fn form_text_mut(&mut self) -> Option<(&mut String, &mut usize)> {
        let cursor = &mut self.edit_cursor;
        match self.form_field {
            FormField::Title => Some((&mut self.form.draft_mut().title, cursor)),
            FormField::Description => Some((&mut self.form.draft_mut().description, cursor)),
            _ => None,
        }
    }

    pub fn submit_form(&mut self) {
        let _lock = self.begin_write();
        match self.session.add(&mut self.form, Utc::now()) {
            Ok(Some(id)) => {
                self.mode = Mode::Navigate;
                self.select_id(Some(&id));
                if !self.visible().iter().any(|i| i.id == id) {
                    self.message = Some("added (hidden by the current filters)".into());
                }
            }
            Ok(None) => {
                self.message = Some("title is required".into());
            }
            Err(e) => {
                self.mode = Mode::Navigate;
                self.report_write_error(e);
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Stats
    // -----------------------------------------------------------------------

    pub fn begin_stat_edit(&mut self, field: StatField) {
        self.edit_buffer = stats_ops::field_display(self.session.stats(), field);
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::EditStat(field);
    }

    pub fn commit_stat_edit(&mut self) {
        let Mode::EditStat(field) = self.mode else {
            return;
        };
        self.mode = Mode::Navigate;
        let raw = std::mem::take(&mut self.edit_buffer);
        let _lock = self.begin_write();
        if let Err(e) = self.session.set_stat(field, &raw) {
            self.report_write_error(e);
        }
    }

    pub fn cancel_stat_edit(&mut self) {
        self.edit_buffer.clear();
        self.mode = Mode::Navigate;
    }

    /// Pick up writes made by another process (e.g. `sb add`)
    pub fn reload_from_disk(&mut self) {
        let keep = self.selected_id();
        self.session.reload();
        if let Some(id) = &self.pending_delete
            && self.session.find(id).is_none()
        {
            self.cancel_delete();
        }
        self.select_id(keep.as_deref());
    }
}

/// Restore filters and cursor from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(ui_state) = read_ui_state(&app.board.board_dir) else {
        return;
    };
    if let Some(filter) = StatusFilter::parse(&ui_state.status_filter) {
        app.status_filter = filter;
    }
    if let Some(filter) = CategoryFilter::parse(&ui_state.category_filter) {
        app.category_filter = filter;
    }
    app.select_id(ui_state.selected.as_deref());
}

/// Save filters and cursor to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let ui_state = UiState {
        status_filter: app.status_filter.as_str().to_string(),
        category_filter: app.category_filter.as_str().to_string(),
        selected: app.selected_id(),
    };
    if let Err(e) = write_ui_state(&app.board.board_dir, &ui_state) {
        eprintln!("warning: could not save UI state: {}", e);
    }
}

/// Run the TUI application
pub fn run(board_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = resolve_start(board_dir)?;
    let board = find_board(&start)?;
    std::fs::create_dir_all(board.store_dir())?;
    let repo: Box<dyn Repository> = Box::new(open_repository(&board));

    let mut app = App::new(board, repo);
    restore_ui_state(&mut app);

    let watcher = match StoreWatcher::start(&app.board.store_dir()) {
        Ok(w) => Some(w),
        Err(e) => {
            eprintln!("warning: not watching for outside changes: {}", e);
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    save_ui_state(&app);
    // Only collections whose last save failed are written here
    let _lock = BoardLock::acquire_default(&app.board.board_dir).ok();
    if let Err(e) = app.session.close() {
        eprintln!("warning: final save failed: {}", e);
    }

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Some(watcher) = watcher
            && !watcher.poll().is_empty()
        {
            app.reload_from_disk();
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
