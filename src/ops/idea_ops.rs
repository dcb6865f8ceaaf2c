use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::idea::{Draft, Idea, Status};

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Generate an id for a new idea: milliseconds since the epoch, bumped past
/// the largest numeric id already in the list so it is always unused.
pub fn next_id(ideas: &[Idea], now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().max(0) as u128;
    let taken: HashSet<u128> = ideas.iter().filter_map(|i| i.id.parse().ok()).collect();
    let id = match taken.iter().max() {
        Some(&max) if max >= millis => max
            .checked_add(1)
            .unwrap_or_else(|| first_unused(&taken, millis)),
        _ => millis,
    };
    id.to_string()
}

/// First id at or after `from` that is not taken, wrapping around to zero
fn first_unused(taken: &HashSet<u128>, from: u128) -> u128 {
    (from..=u128::MAX)
        .chain(0..from)
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(from)
}

/// ISO-8601 creation timestamp, e.g. `2025-05-14T09:30:00.000Z`
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a record from a draft. Returns `None` when the title is blank.
pub fn idea_from_draft(draft: &Draft, ideas: &[Idea], now: DateTime<Utc>) -> Option<Idea> {
    if draft.title.trim().is_empty() {
        return None;
    }
    Some(Idea {
        id: next_id(ideas, now),
        title: draft.title.clone(),
        description: draft.description.clone(),
        category: draft.category,
        priority: draft.priority,
        status: draft.status,
        created_at: timestamp(now),
    })
}

/// Insert at the front: the list is kept newest first
pub fn prepend(ideas: &mut Vec<Idea>, idea: Idea) {
    ideas.insert(0, idea);
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

pub fn find<'a>(ideas: &'a [Idea], id: &str) -> Option<&'a Idea> {
    ideas.iter().find(|i| i.id == id)
}

/// Replace the status of the idea with `id`. Returns false if no idea matched.
pub fn update_status(ideas: &mut [Idea], id: &str, status: Status) -> bool {
    match ideas.iter_mut().find(|i| i.id == id) {
        Some(idea) => {
            idea.status = status;
            true
        }
        None => false,
    }
}

/// Remove the idea with `id`, returning it. Unknown ids are a no-op.
pub fn delete(ideas: &mut Vec<Idea>, id: &str) -> Option<Idea> {
    let idx = ideas.iter().position(|i| i.id == id)?;
    Some(ideas.remove(idx))
}
