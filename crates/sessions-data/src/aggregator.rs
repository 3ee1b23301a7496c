//! Per-user session aggregation over the deduplicated event stream.

use std::collections::HashMap;

use sessions_core::models::{Event, Session, UserId};
use tracing::debug;

/// Build one [`Session`] per distinct user among the surviving events.
///
/// `session_start` / `session_end` are the minimum and maximum `event_time`
/// in the user's partition and `event_count` is the partition size. Output
/// order is the order each user was first seen, which keeps results
/// deterministic for a fixed input. Identities are verbatim JSON values, so
/// there is no cross-type sort order to apply.
pub fn build_sessions(events: &[Event]) -> Vec<Session> {
    let mut sessions: Vec<Session> = Vec::new();
    let mut by_user: HashMap<UserId, usize> = HashMap::new();

    for event in events {
        match by_user.get(&event.user_id) {
            Some(&slot) => {
                let session = &mut sessions[slot];
                session.session_start = session.session_start.min(event.event_time);
                session.session_end = session.session_end.max(event.event_time);
                session.event_count += 1;
            }
            None => {
                by_user.insert(event.user_id.clone(), sessions.len());
                sessions.push(Session {
                    user_id: event.user_id.clone(),
                    session_start: event.event_time,
                    session_end: event.event_time,
                    event_count: 1,
                });
            }
        }
    }

    debug!(
        "Aggregator: {} sessions from {} events",
        sessions.len(),
        events.len()
    );
    sessions
}

// ── Tests ─────────────────────────────────────────────────────────────────────
