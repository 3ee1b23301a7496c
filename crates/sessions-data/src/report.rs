//! CSV report writers for the pipeline result.
//!
//! Column layouts are fixed for compatibility with the tooling that consumes
//! these files; timestamps are rendered as ISO-8601 UTC with a `Z` suffix.

use std::path::Path;

use sessions_core::error::{EventsError, Result};
use sessions_core::formatting::{csv_field, format_utc};
use sessions_core::models::{Session, SkippedEvent};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Write the per-user session summary.
///
/// Columns: `user_id, session_start, session_end, event_count`.
pub fn write_sessions_csv(path: &Path, sessions: &[Session]) -> Result<()> {
    let mut out = String::from("user_id,session_start,session_end,event_count\n");
    for session in sessions {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&session.user_id.to_string()),
            format_utc(&session.session_start),
            format_utc(&session.session_end),
            session.event_count
        ));
    }
    write_file(path, &out)?;
    debug!("Report: {} sessions -> {}", sessions.len(), path.display());
    Ok(())
}

/// Write the audit trail of rejected records.
///
/// Columns: `event, reason, user_id, event_time, event_type`; the last three
/// are empty when the field was not extractable. With `include_preview` a
/// trailing `raw` column carries the bounded raw-text preview.
pub fn write_skipped_csv(
    path: &Path,
    skipped: &[SkippedEvent],
    include_preview: bool,
) -> Result<()> {
    let mut out = String::from("event,reason,user_id,event_time,event_type");
    if include_preview {
        out.push_str(",raw");
    }
    out.push('\n');

    for record in skipped {
        let user_id = record
            .user_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{}",
            record.index,
            csv_field(&record.reason.to_string()),
            csv_field(&user_id),
            csv_field(record.event_time.as_deref().unwrap_or("")),
            csv_field(record.event_type.as_deref().unwrap_or(""))
        ));
        if include_preview {
            out.push(',');
            out.push_str(&csv_field(&record.preview));
        }
        out.push('\n');
    }
    write_file(path, &out)?;
    debug!(
        "Report: {} skipped records -> {}",
        skipped.len(),
        path.display()
    );
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| EventsError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sessions_core::models::{SkipReason, UserId};
    use sessions_core::timestamp::TimestampNormalizer;
    use tempfile::TempDir;

    fn session(user: serde_json::Value, start: &str, end: &str, count: usize) -> Session {
        Session {
            user_id: UserId::new(user),
            session_start: TimestampNormalizer::normalize(start).unwrap(),
            session_end: TimestampNormalizer::normalize(end).unwrap(),
            event_count: count,
        }
    }

    // ── write_sessions_csv ────────────────────────────────────────────────────

    #[test]
    fn test_sessions_csv_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.csv");
        let sessions = vec![
            session(json!(1), "2024-07-10T10:00:00Z", "2024-07-10T10:05:00Z", 2),
            session(json!(2), "2024-07-10T10:10:00Z", "2024-07-10T10:10:00Z", 1),
        ];

        write_sessions_csv(&path, &sessions).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "user_id,session_start,session_end,event_count\n\
             1,2024-07-10T10:00:00Z,2024-07-10T10:05:00Z,2\n\
             2,2024-07-10T10:10:00Z,2024-07-10T10:10:00Z,1\n"
        );
    }

    #[test]
    fn test_sessions_csv_empty_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.csv");
        write_sessions_csv(&path, &[]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "user_id,session_start,session_end,event_count\n"
        );
    }

    #[test]
    fn test_sessions_csv_quotes_awkward_user_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.csv");
        let sessions = vec![session(
            json!("smith, jane"),
            "2024-07-10T10:00:00Z",
            "2024-07-10T10:00:00Z",
            1,
        )];

        write_sessions_csv(&path, &sessions).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"smith, jane\""));
    }

    // ── write_skipped_csv ─────────────────────────────────────────────────────

    #[test]
    fn test_skipped_csv_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skipped.csv");
        let skipped = vec![SkippedEvent {
            index: 4,
            reason: SkipReason::InvalidTimestamp {
                value: "invalid-timestamp".to_string(),
            },
            preview: "{\"user_id\":2}".to_string(),
            user_id: Some(UserId::new(json!(2))),
            event_time: Some("invalid-timestamp".to_string()),
            event_type: Some("click".to_string()),
        }];

        write_skipped_csv(&path, &skipped, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "event,reason,user_id,event_time,event_type\n\
             4,invalid_ISO-8601: invalid-timestamp,2,invalid-timestamp,click\n"
        );
    }

    #[test]
    fn test_skipped_csv_unextractable_fields_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skipped.csv");
        let skipped = vec![SkippedEvent {
            index: 1,
            reason: SkipReason::JsonDecode {
                detail: "EOF while parsing".to_string(),
            },
            preview: "{\"oops\":".to_string(),
            user_id: None,
            event_time: None,
            event_type: None,
        }];

        write_skipped_csv(&path, &skipped, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("1,json_decode_error: EOF while parsing,,,\n"));
    }

    #[test]
    fn test_skipped_csv_preview_column_optional() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skipped.csv");
        let skipped = vec![SkippedEvent {
            index: 2,
            reason: SkipReason::MissingField {
                field: "event_time".to_string(),
            },
            preview: "{\"user_id\":9,\"event_type\":\"a\"}".to_string(),
            user_id: Some(UserId::new(json!(9))),
            event_time: None,
            event_type: Some("a".to_string()),
        }];

        write_skipped_csv(&path, &skipped, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("event,reason,user_id,event_time,event_type,raw\n"));
        // The preview contains commas and quotes, so it must arrive quoted.
        assert!(content.contains("\"{\"\"user_id\"\":9,\"\"event_type\"\":\"\"a\"\"}\""));
    }

    #[test]
    fn test_write_error_carries_path() {
        let path = Path::new("/nonexistent-dir-xyz/sessions.csv");
        let err = write_sessions_csv(path, &[]).unwrap_err();
        assert!(matches!(err, EventsError::FileWrite { .. }));
        assert!(err.to_string().contains("sessions.csv"));
    }
}
