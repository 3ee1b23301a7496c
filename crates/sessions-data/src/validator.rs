//! Record validation and normalization.
//!
//! Each candidate fragment either becomes a normalized [`Event`] or a
//! [`SkippedEvent`] carrying exactly one rejection reason. A bad record never
//! aborts the run.

use serde_json::{Map, Value};
use sessions_core::models::{Event, RawEvent, SkipReason, SkippedEvent, UserId};
use sessions_core::timestamp::TimestampNormalizer;
use tracing::{debug, warn};

/// Maximum characters of raw text preserved for audit display.
pub const PREVIEW_MAX_CHARS: usize = 300;

// ── Public API ────────────────────────────────────────────────────────────────

/// Validate one fragment. Checks run in order and the first failure wins:
///
/// 1. the text parses as a single JSON object;
/// 2. `user_id`, `event_time`, `event_type` are present and non-null;
/// 3. `event_time` is a string that normalizes under the ISO-8601 rule.
///
/// On success the event keeps `user_id` verbatim (no type coercion) and
/// stores `event_time` as a UTC instant.
pub fn validate(raw: &RawEvent) -> Result<Event, SkippedEvent> {
    let value: Value = match serde_json::from_str(&raw.text) {
        Ok(v) => v,
        Err(e) => {
            return Err(skip(
                raw,
                SkipReason::JsonDecode {
                    detail: e.to_string(),
                },
                None,
            ))
        }
    };

    let Value::Object(ref obj) = value else {
        return Err(skip(
            raw,
            SkipReason::JsonDecode {
                detail: "not a JSON object".to_string(),
            },
            None,
        ));
    };

    for field in ["user_id", "event_time", "event_type"] {
        if matches!(obj.get(field), None | Some(Value::Null)) {
            return Err(skip(
                raw,
                SkipReason::MissingField {
                    field: field.to_string(),
                },
                Some(obj),
            ));
        }
    }

    let time_value = &obj["event_time"];
    let Some(time_str) = time_value.as_str() else {
        return Err(skip(
            raw,
            SkipReason::InvalidTimestamp {
                value: time_value.to_string(),
            },
            Some(obj),
        ));
    };
    let Some(event_time) = TimestampNormalizer::normalize(time_str) else {
        return Err(skip(
            raw,
            SkipReason::InvalidTimestamp {
                value: time_str.to_string(),
            },
            Some(obj),
        ));
    };

    Ok(Event {
        user_id: UserId::new(obj["user_id"].clone()),
        event_time,
        event_type: stringify(&obj["event_type"]),
    })
}

/// Validate every fragment, splitting the stream into accepted and rejected
/// records while preserving input order on both sides.
pub fn validate_all(raws: &[RawEvent]) -> (Vec<Event>, Vec<SkippedEvent>) {
    let mut events = Vec::with_capacity(raws.len());
    let mut skipped = Vec::new();

    for raw in raws {
        match validate(raw) {
            Ok(event) => events.push(event),
            Err(record) => {
                warn!("skip event={} reason={}", record.index, record.reason);
                skipped.push(record);
            }
        }
    }

    debug!(
        "Validator: {} accepted, {} skipped of {} fragments",
        events.len(),
        skipped.len(),
        raws.len()
    );
    (events, skipped)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Build the audit record for a rejected fragment, pulling whichever of the
/// three required fields were extractable before the failing check.
fn skip(raw: &RawEvent, reason: SkipReason, obj: Option<&Map<String, Value>>) -> SkippedEvent {
    let field = |name: &str| {
        obj.and_then(|o| o.get(name))
            .filter(|v| !v.is_null())
            .cloned()
    };

    SkippedEvent {
        index: raw.index,
        reason,
        preview: preview(&raw.text),
        user_id: field("user_id").map(UserId::new),
        event_time: field("event_time").map(|v| stringify(&v)),
        event_type: field("event_type").map(|v| stringify(&v)),
    }
}

/// Truncate raw text to the audit preview length on a char boundary.
fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_MAX_CHARS).collect()
}

/// Strings render as-is; any other JSON value takes its compact rendering.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
