use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

// ── TimestampNormalizer ───────────────────────────────────────────────────────

/// Applies the ISO-8601 normalization rule to `event_time` strings.
///
/// * a trailing `Z` is treated as `+00:00`;
/// * an explicit offset is converted to UTC;
/// * a timestamp with no offset at all is assumed to already be UTC.
///
/// Two textual representations of the same instant normalize to the same
/// value, so they compare equal downstream.
pub struct TimestampNormalizer;

impl TimestampNormalizer {
    /// Parse `raw` into a UTC instant, or `None` when it is not ISO-8601.
    pub fn normalize(raw: &str) -> Option<DateTime<Utc>> {
        let txt = raw.trim();
        if txt.is_empty() {
            return None;
        }

        // Rewrite the `Z` suffix so a single RFC 3339 parse covers both
        // spellings of UTC.
        let with_offset = match txt.strip_suffix('Z') {
            Some(stripped) => format!("{}+00:00", stripped),
            None => txt.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&with_offset) {
            return Some(dt.with_timezone(&Utc));
        }

        // Offset-less datetimes, `T` or space separated, optional fraction.
        const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(txt, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        // A bare date is midnight UTC.
        if let Ok(date) = chrono::NaiveDate::parse_from_str(txt, "%Y-%m-%d") {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }

        debug!("TimestampNormalizer: could not parse \"{}\"", txt);
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
