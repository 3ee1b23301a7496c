use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── UserId ────────────────────────────────────────────────────────────────────

/// A user identity preserved verbatim from the input.
///
/// Wraps the original JSON scalar without coercion, so an integer `1` and a
/// string `"1"` are distinct users. Equality and hashing follow the wrapped
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub serde_json::Value);

impl UserId {
    /// Build an id from any JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for UserId {
    /// Strings render bare (no surrounding quotes); every other JSON value
    /// renders in its compact JSON form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

// ── RawEvent ──────────────────────────────────────────────────────────────────

/// One textual candidate fragment produced by extraction.
///
/// `index` is 1-based and assigned in input order, regardless of whether the
/// fragment later validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub index: usize,
    pub text: String,
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A validated, normalized user-action record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Identity copied verbatim from the input.
    pub user_id: UserId,
    /// Timestamp normalized to a UTC instant.
    pub event_time: DateTime<Utc>,
    /// Event type string, preserved as written.
    pub event_type: String,
}

// ── SkipReason ────────────────────────────────────────────────────────────────

/// Why a fragment was rejected. One reason per skipped record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The fragment is not a syntactically valid JSON object.
    JsonDecode { detail: String },
    /// A required field is absent or null.
    MissingField { field: String },
    /// `event_time` is present but does not parse as an ISO-8601 datetime.
    InvalidTimestamp { value: String },
}

impl SkipReason {
    /// The fixed taxonomy label for this reason.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::JsonDecode { .. } => "json_decode_error",
            SkipReason::MissingField { .. } => "missing_key_or_bad_schema",
            SkipReason::InvalidTimestamp { .. } => "invalid_ISO-8601",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::JsonDecode { detail } => {
                write!(f, "{}: {}", self.label(), detail)
            }
            SkipReason::MissingField { field } => {
                write!(f, "{}: '{}'", self.label(), field)
            }
            SkipReason::InvalidTimestamp { value } => {
                write!(f, "{}: {}", self.label(), value)
            }
        }
    }
}

// ── SkippedEvent ──────────────────────────────────────────────────────────────

/// Audit record for a fragment that failed validation.
///
/// Carries the fragment's sequence index, the triggering reason, a bounded
/// preview of the raw text, and whichever of the three required fields could
/// be extracted before the failing check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEvent {
    /// 1-based position among extracted fragments.
    pub index: usize,
    pub reason: SkipReason,
    /// Raw text truncated for audit display.
    pub preview: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// The time span and count of one user's surviving events in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    /// Minimum event time for this user (UTC).
    pub session_start: DateTime<Utc>,
    /// Maximum event time for this user (UTC).
    pub session_end: DateTime<Utc>,
    /// Number of surviving events for this user.
    pub event_count: usize,
}

// ── RunStatistics ─────────────────────────────────────────────────────────────

/// Summary counters for one pipeline run, derived from collection sizes.
///
/// `total_events == valid_events + skipped_events` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Fragments extracted from the input.
    pub total_events: usize,
    /// Records that passed every validation rule (pre-dedup).
    pub valid_events: usize,
    /// Records rejected by validation.
    pub skipped_events: usize,
    /// Exact duplicates dropped by deduplication.
    pub duplicates_removed: usize,
    /// Distinct user identities among the sessions.
    pub unique_users: usize,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
