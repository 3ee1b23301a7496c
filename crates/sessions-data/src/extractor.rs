//! Candidate-fragment extraction from raw input text.
//!
//! The input is not guaranteed to be one JSON object per line: objects may be
//! pretty-printed, separated by commas or garbage, or wrapped in a single
//! top-level array. The scanner below tolerates all of these.

use sessions_core::models::RawEvent;
use tracing::debug;

/// Split raw input text into candidate event fragments.
///
/// If the whole (trimmed) input parses as a single JSON array, each array
/// element becomes one fragment. Otherwise a brace-depth scan emits one
/// fragment per balanced `{...}` region, ignoring braces inside string
/// literals. Text between objects never consumes a sequence index.
///
/// A trailing unterminated object (EOF at positive depth) is still emitted so
/// validation can report it instead of silently dropping it.
pub fn extract_fragments(content: &str) -> Vec<RawEvent> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(trimmed) {
            let fragments: Vec<RawEvent> = items
                .iter()
                .enumerate()
                .map(|(i, item)| RawEvent {
                    index: i + 1,
                    text: item.to_string(),
                })
                .collect();
            debug!(
                "Extractor: {} fragments from top-level array",
                fragments.len()
            );
            return fragments;
        }
    }

    let fragments = scan_objects(content);
    debug!("Extractor: {} fragments from object scan", fragments.len());
    fragments
}

/// Brace-depth scan over the input.
///
/// States: outside-object, inside-object, inside-string, escape-pending.
/// Strings are only tracked inside an object, so a stray quote in the text
/// between objects cannot swallow the rest of the input.
fn scan_objects(content: &str) -> Vec<RawEvent> {
    let mut texts: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escape_pending = false;

    for (pos, ch) in content.char_indices() {
        if in_string {
            if escape_pending {
                escape_pending = false;
            } else if ch == '\\' {
                escape_pending = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(pos);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        texts.push(content[s..pos + 1].to_string());
                    }
                }
            }
            _ => {}
        }
    }

    // Truncated input: keep the unterminated trailer for the audit trail.
    if depth > 0 {
        if let Some(s) = start.take() {
            texts.push(content[s..].to_string());
        }
    }

    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| RawEvent { index: i + 1, text })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_one_object_per_line() {
        let content = "{\"a\":1}\n{\"b\":2}\n{\"c\":3}\n";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].index, 1);
        assert_eq!(fragments[0].text, "{\"a\":1}");
        assert_eq!(fragments[2].index, 3);
    }

    #[test]
    fn test_pretty_printed_multiline_object() {
        let content = "{\n  \"user_id\": 1,\n  \"event_type\": \"login\"\n}\n{\"x\":2}";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].text.contains("\"user_id\": 1"));
    }

    #[test]
    fn test_braces_inside_string_values_ignored() {
        let content = "{\"note\":\"curly } brace { soup\"}\n{\"b\":2}";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "{\"note\":\"curly } brace { soup\"}");
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let content = r#"{"note":"she said \"}\" loudly"}"#;
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, content);
    }

    #[test]
    fn test_blank_lines_and_separators_consume_no_index() {
        let content = "\n{\"a\":1}\n\n,\n{\"b\":2},{\"c\":3}\n\n";
        let fragments = extract_fragments(content);
        let indices: Vec<usize> = fragments.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_nested_objects_emit_one_fragment() {
        let content = "{\"outer\":{\"inner\":{\"deep\":1}}}";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, content);
    }

    #[test]
    fn test_truncated_trailing_object_still_emitted() {
        let content = "{\"a\":1}\n{\"b\":2,\"unclosed\":";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[1].index, 2);
        assert_eq!(fragments[1].text, "{\"b\":2,\"unclosed\":");
    }

    #[test]
    fn test_top_level_array_elements_become_fragments() {
        let content = "[{\"a\":1}, {\"b\":2}]";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "{\"a\":1}");
        assert_eq!(fragments[1].index, 2);
    }

    #[test]
    fn test_top_level_array_keeps_non_object_elements() {
        // Non-object elements still get a fragment (and an index) so that
        // validation can reject them with a reason.
        let content = "[{\"a\":1}, 7, \"x\"]";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[1].text, "7");
        assert_eq!(fragments[2].text, "\"x\"");
    }

    #[test]
    fn test_malformed_array_falls_back_to_scan() {
        // Not valid JSON as a whole, but the objects inside are recoverable.
        let content = "[{\"a\":1}, {\"b\":2}";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "{\"a\":1}");
    }

    #[test]
    fn test_garbage_without_braces_yields_nothing() {
        assert!(extract_fragments("this is not json at all").is_empty());
        assert!(extract_fragments("[1, 2").is_empty());
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(extract_fragments("").is_empty());
        assert!(extract_fragments("   \n  ").is_empty());
    }

    #[test]
    fn test_stray_closing_brace_ignored() {
        let content = "}\n{\"a\":1}";
        let fragments = extract_fragments(content);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "{\"a\":1}");
    }

    #[test]
    fn test_indices_strictly_increasing_from_one() {
        let content = "junk {\"a\":1} junk {\"b\":2} junk {\"c\":3}";
        let fragments = extract_fragments(content);
        for (i, fragment) in fragments.iter().enumerate() {
            assert_eq!(fragment.index, i + 1);
        }
    }
}
