mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, open_repository};
use crate::io::lock::BoardLock;
use crate::io::recovery;
use crate::io::repository::KvRepository;
use crate::io::store::FileStore;
use crate::model::board::Board;
use crate::ops::form::FormController;
use crate::session::Session;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let start = resolve_start(cli.board_dir.as_deref())?;

    match cli.command {
        None => {
            eprintln!("no command given (run `sb` without arguments for the TUI)");
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &start),

            // Read commands
            Commands::List(args) => cmd_list(args, &start, json),
            Commands::Show(args) => cmd_show(args, &start, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, &start, json),
            Commands::Status(args) => cmd_status(args, &start),
            Commands::Delete(args) => cmd_delete(args, &start),

            Commands::Stats(args) => cmd_stats(args, &start, json),
            Commands::Recovery(args) => cmd_recovery(args, &start, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `-C DIR` if given, else the working directory
pub fn resolve_start(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e).into()),
        None => Ok(std::env::current_dir()?),
    }
}

fn open_session(board: &Board) -> Session<KvRepository<FileStore>> {
    Session::open(open_repository(board))
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, start: &Path, json: bool) -> CmdResult {
    let status = parse_status_filter(&args.status)?;
    let category = parse_category_filter(&args.category)?;
    let board = board_io::find_board(start)?;
    let session = open_session(&board);
    let visible = session.visible(status, category);

    if json {
        return print_json(&IdeaListJson {
            status: status.as_str(),
            category: category.as_str(),
            total: session.ideas().len(),
            ideas: visible,
        });
    }

    if visible.is_empty() {
        if session.ideas().is_empty() {
            println!("no ideas yet (add one with `sb add <title>`)");
        } else {
            println!("no ideas match {} / {}", status.label(), category.label());
        }
        return Ok(());
    }
    for idea in visible {
        println!("{}", format_idea_line(idea));
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, start: &Path, json: bool) -> CmdResult {
    let board = board_io::find_board(start)?;
    let session = open_session(&board);
    let idea = session
        .find(&args.id)
        .ok_or_else(|| format!("idea not found: {}", args.id))?;

    if json {
        return print_json(idea);
    }
    for line in format_idea_detail(idea) {
        println!("{}", line);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, start: &Path, json: bool) -> CmdResult {
    let board = board_io::find_board(start)?;

    let mut form = FormController::new(&board.config.form);
    form.open();
    {
        let draft = form.draft_mut();
        draft.title = args.title;
        if let Some(description) = args.description {
            draft.description = description;
        }
        if let Some(category) = args.category {
            draft.category = parse_category(&category)?;
        }
        if let Some(priority) = args.priority {
            draft.priority = parse_priority(&priority)?;
        }
        if let Some(status) = args.status {
            draft.status = parse_status(&status)?;
        }
    }

    let _lock = BoardLock::acquire_default(&board.board_dir)?;
    let mut session = open_session(&board);
    match session.add(&mut form, Utc::now())? {
        Some(id) => {
            if json {
                if let Some(idea) = session.find(&id) {
                    print_json(idea)?;
                }
            } else {
                println!("{}", id);
            }
        }
        None => println!("title is empty; nothing added"),
    }
    Ok(())
}

fn cmd_status(args: StatusArgs, start: &Path) -> CmdResult {
    let status = parse_status(&args.status)?;
    let board = board_io::find_board(start)?;
    let _lock = BoardLock::acquire_default(&board.board_dir)?;
    let mut session = open_session(&board);

    if session.update_status(&args.id, status)? {
        println!("{} → {}", args.id, status);
    } else {
        println!("no idea with id {}; nothing changed", args.id);
    }
    Ok(())
}

fn cmd_delete(args: DeleteArgs, start: &Path) -> CmdResult {
    let board = board_io::find_board(start)?;
    let _lock = BoardLock::acquire_default(&board.board_dir)?;
    let mut session = open_session(&board);

    match session.delete(&args.id)? {
        Some(idea) => {
            recovery::log_idea_deletion(&board.board_dir, &idea);
            println!("deleted {} {}", idea.id, idea.title);
        }
        None => println!("no idea with id {}; nothing changed", args.id),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

fn cmd_stats(cmd: StatsCmd, start: &Path, json: bool) -> CmdResult {
    let board = board_io::find_board(start)?;

    match cmd.action {
        None => {
            let session = open_session(&board);
            if json {
                return print_json(&stats_to_json(session.stats(), session.ideas()));
            }
            for line in format_stats(session.stats()) {
                println!("{}", line);
            }
        }
        Some(StatsAction::Set(args)) => {
            let field = parse_stat_field(&args.field)?;
            let _lock = BoardLock::acquire_default(&board.board_dir)?;
            let mut session = open_session(&board);
            session.set_stat(field, &args.value)?;
            println!("{}", format_stat_line(session.stats(), field));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

fn cmd_recovery(cmd: RecoveryCmd, start: &Path, json: bool) -> CmdResult {
    let board = board_io::find_board(start)?;

    match cmd.action {
        None => {
            let entries = recovery::read_recovery_entries(&board.board_dir, Some(cmd.limit));
            if json {
                let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
                return print_json(&values);
            }
            if entries.is_empty() {
                println!("recovery log is empty");
                return Ok(());
            }
            for entry in &entries {
                print!("{}", entry.to_markdown());
            }
        }
        Some(RecoveryAction::Prune(args)) => {
            let before = args
                .before
                .as_deref()
                .map(parse_timestamp)
                .transpose()?;
            let _lock = BoardLock::acquire_default(&board.board_dir)?;
            let removed = recovery::prune_recovery(&board.board_dir, before, args.all)?;
            println!("pruned {} entries", removed);
        }
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(&board.board_dir).display());
        }
    }
    Ok(())
}

/// RFC 3339 timestamp or bare `YYYY-MM-DD` (midnight UTC)
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{}' (expected RFC 3339 or YYYY-MM-DD)", s))
}
