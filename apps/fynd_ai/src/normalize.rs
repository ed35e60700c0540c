//! Turns raw model text into a guaranteed `{response, summary, action}` object.

use crate::payload::{parse_fallback, PartialAiPayload};

/// Total: any malformed input degrades to a canned payload, never an error.
/// Returns the patched object serialized back to a JSON string; callers
/// expect a string they re-parse themselves.
pub fn normalize(raw: &str, rating: i32) -> String {
    let text = strip_code_fences(raw.trim());
    match serde_json::from_str::<PartialAiPayload>(&text) {
        Ok(partial) => partial.merge_with_defaults().to_json(),
        Err(_) => parse_fallback(rating).to_json(),
    }
}

fn strip_code_fences(text: &str) -> String {
    if !text.contains("```") {
        return text.to_string();
    }
    if let Some(block) = fenced_object(text) {
        return block;
    }
    // Marker tokens without a well-formed block: best-effort cleanup.
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Finds a ```-fenced JSON object (optionally tagged `json`) anywhere in the
/// text and returns its interior.
fn fenced_object(text: &str) -> Option<String> {
    let mut offset = 0;
    while let Some(pos) = text[offset..].find("```") {
        let fence_end = offset + pos + 3;
        let rest = text[fence_end..]
            .strip_prefix("json")
            .unwrap_or(&text[fence_end..]);
        let rest = rest.trim_start();
        if rest.starts_with('{') {
            // Shortest `{..}` span whose closing brace is followed by a
            // closing fence.
            for (idx, _) in rest.match_indices('}') {
                let tail = rest[idx + 1..].trim_start();
                if tail.starts_with("```") {
                    return Some(rest[..idx + 1].to_string());
                }
            }
        }
        offset = fence_end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parsed(raw: &str, rating: i32) -> Value {
        serde_json::from_str(&normalize(raw, rating)).unwrap()
    }

    #[test]
    fn fenced_output_with_missing_action_is_patched() {
        let raw = "```json\n{\"response\":\"ok\",\"summary\":\"s\"}\n```";
        assert_eq!(
            parsed(raw, 4),
            json!({"response": "ok", "summary": "s", "action": "N/A"})
        );
    }

    #[test]
    fn untagged_fence_is_stripped() {
        let raw = "```\n{\"response\":\"r\",\"summary\":\"s\",\"action\":\"a\"}\n```";
        assert_eq!(
            parsed(raw, 1),
            json!({"response": "r", "summary": "s", "action": "a"})
        );
    }

    #[test]
    fn fence_surrounded_by_prose_is_found() {
        let raw = "Sure, here you go:\n```json\n{\"response\":\"r\",\"summary\":\"s\",\"action\":\"a\"}\n```\nHope that helps!";
        assert_eq!(
            parsed(raw, 5),
            json!({"response": "r", "summary": "s", "action": "a"})
        );
    }

    #[test]
    fn bare_json_passes_through() {
        let raw = "{\"response\":\"r\",\"summary\":\"s\",\"action\":\"a\"}";
        assert_eq!(
            parsed(raw, 5),
            json!({"response": "r", "summary": "s", "action": "a"})
        );
    }

    #[test]
    fn unclosed_fence_falls_back_to_marker_stripping() {
        let raw = "```json\n{\"response\":\"r\",\"summary\":\"s\",\"action\":\"a\"}";
        assert_eq!(
            parsed(raw, 2),
            json!({"response": "r", "summary": "s", "action": "a"})
        );
    }

    #[test]
    fn non_json_output_yields_rating_fallback() {
        assert_eq!(
            parsed("not json at all", 3),
            json!({
                "response": "Thank you for your feedback. We value your input.",
                "summary": "Customer rated 3 stars",
                "action": "Review feedback"
            })
        );
    }

    #[test]
    fn json_array_yields_rating_fallback() {
        let body = parsed("[1, 2, 3]", 5);
        assert_eq!(body["summary"], "Customer rated 5 stars");
    }

    #[test]
    fn wrong_typed_values_are_kept() {
        let raw = "```json\n{\"response\": 7, \"summary\": \"s\", \"action\": \"a\"}\n```";
        assert_eq!(parsed(raw, 4)["response"], json!(7));
    }
}
