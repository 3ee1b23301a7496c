use chrono::{DateTime, Utc};

/// Render a UTC instant in the fixed output form `YYYY-MM-DDTHH:MM:SSZ`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sessions_core::formatting::format_utc;
///
/// let ts = Utc.with_ymd_and_hms(2024, 7, 10, 10, 5, 0).unwrap();
/// assert_eq!(format_utc(&ts), "2024-07-10T10:05:00Z");
/// ```
pub fn format_utc(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Quote a CSV field when it contains a comma, double quote, or newline.
///
/// Embedded double quotes are doubled per RFC 4180; plain fields pass
/// through unchanged.
///
/// # Examples
///
/// ```
/// use sessions_core::formatting::csv_field;
///
/// assert_eq!(csv_field("login"), "login");
/// assert_eq!(csv_field("a,b"), "\"a,b\"");
/// assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
