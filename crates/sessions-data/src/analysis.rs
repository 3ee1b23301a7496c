//! Pipeline orchestration for event-sessions.
//!
//! Runs extraction → validation → deduplication → aggregation in sequence
//! over one in-memory input and derives the run statistics, returning a
//! [`PipelineResult`] ready for the CLI layer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sessions_core::error::Result;
use sessions_core::models::{Event, RunStatistics, Session, SkippedEvent};
use tracing::debug;

use crate::aggregator::build_sessions;
use crate::dedup::dedup_events;
use crate::extractor::extract_fragments;
use crate::reader::read_input;
use crate::validator::validate_all;

// ── Public types ──────────────────────────────────────────────────────────────

/// The complete output of one pipeline run.
///
/// Owns every collection for the lifetime of the run; downstream consumers
/// take references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Accepted events with exact duplicates removed, in input order.
    pub events: Vec<Event>,
    /// Audit records for every rejected fragment, in input order.
    pub skipped: Vec<SkippedEvent>,
    /// One session per distinct user, in first-seen order.
    pub sessions: Vec<Session>,
    /// Summary counters derived from the collections above.
    pub stats: RunStatistics,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline over already-read input text.
///
/// Each run is a pure function of `content`: no shared or module-level state,
/// so unrelated inputs can be processed concurrently. Input that yields zero
/// fragments (empty text, brace-free garbage) is a successful run with
/// all-zero statistics, not an error.
pub fn process_content(content: &str) -> PipelineResult {
    let fragments = extract_fragments(content);
    let total_events = fragments.len();

    let (accepted, skipped) = validate_all(&fragments);
    let valid_events = accepted.len();

    let (events, duplicates_removed) = dedup_events(accepted);
    let sessions = build_sessions(&events);

    let stats = RunStatistics {
        total_events,
        valid_events,
        skipped_events: skipped.len(),
        duplicates_removed,
        unique_users: sessions.len(),
    };

    debug!(
        "Pipeline: {} extracted, {} valid, {} skipped, {} duplicates, {} users",
        stats.total_events,
        stats.valid_events,
        stats.skipped_events,
        stats.duplicates_removed,
        stats.unique_users
    );

    PipelineResult {
        events,
        skipped,
        sessions,
        stats,
    }
}

/// Read input from `path` (file or directory) and run the pipeline.
///
/// Only input-level problems surface here as errors; malformed records are
/// recovered into the skipped collection.
pub fn process_path(path: &Path) -> Result<PipelineResult> {
    let content = read_input(path)?;
    Ok(process_content(&content))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
