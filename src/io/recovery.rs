//! Append-only markdown log of things the board could not keep normally:
//! store entries that failed to parse, writes that failed, and deleted ideas.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::model::idea::Idea;

/// Size past which old entries are trimmed on the next append (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Default number of days before entries are prunable.
pub const PRUNE_AGE_DAYS: i64 = 30;

const FILE_HEADER: &str = "\
<!-- storyboard recovery log: data the board could not keep normally.
     If an idea went missing, check here.
     View with: sb recovery
     Prune old entries: sb recovery prune -->

---
";

/// Separator between timestamp and category in entry headers
const HEADER_SEP: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// A stored entry could not be parsed and was replaced by its default
    Load,
    /// A store write failed; the body holds what should have been written
    Write,
    /// An idea was deleted; the body holds its JSON
    Delete,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Load => write!(f, "load"),
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Delete => write!(f, "delete"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "load" => Some(RecoveryCategory::Load),
            "write" => Some(RecoveryCategory::Write),
            "delete" => Some(RecoveryCategory::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

pub fn recovery_log_path(board_dir: &Path) -> PathBuf {
    board_dir.join(".recovery.log")
}

impl RecoveryEntry {
    /// The entry as it appears in the log, also used by `sb recovery`
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {}{}{}: {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            HEADER_SEP,
            self.category,
            self.description,
        );

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            let fence = fence_for(&self.body);
            out.push_str(&format!("\n{}text\n", fence));
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }

        out.push_str("\n---\n");
        out
    }

    /// Serialize to JSON value for `sb recovery --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }
}

/// A backtick fence longer than any backtick run in `body`, at least three
fn fence_for(body: &str) -> String {
    let longest = body.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Length of the backtick run if `line` opens a code block
fn opening_fence(line: &str) -> Option<usize> {
    let len = line.len() - line.trim_start_matches('`').len();
    (len >= 3).then_some(len)
}

/// Does `line` close a code block opened with `open` backticks?
fn closes_fence(line: &str, open: usize) -> bool {
    let line = line.trim_end();
    line.len() >= open && line.bytes().all(|b| b == b'`')
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append an entry to the log. Errors are swallowed and printed to stderr.
pub fn log_recovery(board_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(board_dir, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(board_dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(board_dir);

    if let Ok(meta) = fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        let cutoff = Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS);
        if let Ok(content) = fs::read_to_string(&path) {
            let _ = fs::write(&path, prune_entries_before(&content, &cutoff));
        }
    }

    let needs_header = fs::metadata(&path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// A store entry failed to parse; `raw` is what was on disk.
pub fn log_load_failure(board_dir: &Path, key: &str, error: &str, raw: &str) {
    log_recovery(
        board_dir,
        RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Load,
            description: format!("{} could not be parsed, started empty", key),
            fields: vec![
                ("Key".to_string(), key.to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            body: raw.to_string(),
        },
    );
}

/// A store write failed; `payload` is what should have been written.
pub fn log_write_failure(board_dir: &Path, key: &str, error: &str, payload: &str) {
    log_recovery(
        board_dir,
        RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Write,
            description: format!("{} not saved", key),
            fields: vec![
                ("Key".to_string(), key.to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            body: payload.to_string(),
        },
    );
}

/// Keep a copy of a deleted idea so it can be restored by hand.
pub fn log_idea_deletion(board_dir: &Path, idea: &Idea) {
    let body = serde_json::to_string_pretty(idea).unwrap_or_default();
    log_recovery(
        board_dir,
        RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Delete,
            description: format!("idea {} deleted", idea.id),
            fields: vec![
                ("Id".to_string(), idea.id.clone()),
                ("Title".to_string(), idea.title.clone()),
            ],
            body,
        },
    );
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read entries, most recent first, keeping at most `limit`.
pub fn read_recovery_entries(board_dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match fs::read_to_string(recovery_log_path(board_dir)) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }
    entries.reverse();
    entries
}

fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    split_log(content)
        .1
        .into_iter()
        .filter_map(parse_entry)
        .collect()
}

/// Split the log into its file header (through the first `---` line) and
/// the raw text of each entry. `## ` lines inside code blocks do not start
/// an entry.
fn split_log(content: &str) -> (&str, Vec<&str>) {
    let body_start = content.find("\n---\n").map_or(0, |i| i + "\n---\n".len());
    let (header, rest) = content.split_at(body_start);

    let mut chunks = Vec::new();
    let mut entry_start = None;
    let mut open_fence = None;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if let Some(open) = open_fence {
            if closes_fence(line, open) {
                open_fence = None;
            }
        } else if let Some(len) = opening_fence(line) {
            open_fence = Some(len);
        } else if line.starts_with("## ") {
            if let Some(start) = entry_start {
                chunks.push(&rest[start..offset]);
            }
            entry_start = Some(offset);
        }
        offset += line.len();
    }
    if let Some(start) = entry_start {
        chunks.push(&rest[start..]);
    }
    (header, chunks)
}

fn chunk_header(chunk: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    chunk
        .lines()
        .next()?
        .strip_prefix("## ")
        .and_then(parse_entry_header)
}

fn parse_entry(chunk: &str) -> Option<RecoveryEntry> {
    let (timestamp, category, description) = chunk_header(chunk)?;

    let mut fields = Vec::new();
    let mut body: Vec<&str> = Vec::new();
    let mut open_fence = None;
    for line in chunk.lines().skip(1) {
        if let Some(open) = open_fence {
            if closes_fence(line, open) {
                open_fence = None;
            } else {
                body.push(line);
            }
        } else if let Some(len) = opening_fence(line) {
            open_fence = Some(len);
        } else if line == "---" {
            break;
        } else if let Some((key, value)) = line.trim().split_once(": ") {
            fields.push((key.to_string(), value.to_string()));
        }
    }

    Some(RecoveryEntry {
        timestamp,
        category,
        description,
        fields,
        body: body.join("\n"),
    })
}

/// Parse an entry header: `<timestamp> | <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(HEADER_SEP)?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let (category_str, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category_str)?;
    Some((timestamp, category, description.to_string()))
}

// ---------------------------------------------------------------------------
// Pruning
// ---------------------------------------------------------------------------

/// Prune entries older than `before` (default: [`PRUNE_AGE_DAYS`]), or all
/// of them. Returns the number of entries removed. Callers hold the board
/// lock.
pub fn prune_recovery(
    board_dir: &Path,
    before: Option<DateTime<Utc>>,
    all: bool,
) -> io::Result<usize> {
    let path = recovery_log_path(board_dir);
    if !path.exists() {
        return Ok(0);
    }
    let content = fs::read_to_string(&path)?;
    let original_count = parse_entries(&content).len();

    if all {
        fs::write(&path, FILE_HEADER)?;
        return Ok(original_count);
    }

    let cutoff = before.unwrap_or_else(|| Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS));
    let trimmed = prune_entries_before(&content, &cutoff);
    let new_count = parse_entries(&trimmed).len();
    fs::write(&path, &trimmed)?;
    Ok(original_count - new_count)
}

/// Drop entries with timestamps before `cutoff`, keeping the file header.
fn prune_entries_before(content: &str, cutoff: &DateTime<Utc>) -> String {
    let (header, chunks) = split_log(content);
    let mut result = header.to_string();
    for chunk in chunks {
        if chunk_header(chunk).is_some_and(|(ts, _, _)| ts >= *cutoff) {
            result.push_str(chunk);
        }
    }
    result
}
