//! Exact-duplicate removal over the accepted event stream.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sessions_core::models::{Event, UserId};
use tracing::debug;

/// Drop events whose `(user_id, event_time, event_type)` key was already
/// seen, keeping the first occurrence in input order.
///
/// The filter is stable: retained events keep their relative order. Returns
/// the surviving subsequence and the number of duplicates removed.
pub fn dedup_events(events: Vec<Event>) -> (Vec<Event>, usize) {
    let before = events.len();
    let mut seen: HashSet<(UserId, DateTime<Utc>, String)> = HashSet::with_capacity(before);

    let retained: Vec<Event> = events
        .into_iter()
        .filter(|event| {
            seen.insert((
                event.user_id.clone(),
                event.event_time,
                event.event_type.clone(),
            ))
        })
        .collect();

    let removed = before - retained.len();
    debug!("Dedup: removed {} of {} events", removed, before);
    (retained, removed)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
