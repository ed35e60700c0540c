use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder inserted for any of the three keys the model left out.
const PLACEHOLDER: &str = "N/A";

/// Fully-populated AI payload: what `generate` serializes and the HTTP app
/// re-parses. Values stay untyped, so a number where a string was expected
/// passes through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiPayload {
    pub response: Value,
    pub summary: Value,
    pub action: Value,
}

/// Loose view of raw model output: any of the three keys may be missing.
#[derive(Debug, Deserialize)]
pub struct PartialAiPayload {
    pub response: Option<Value>,
    pub summary: Option<Value>,
    pub action: Option<Value>,
}

impl PartialAiPayload {
    /// Fills absent keys with the placeholder, producing the full payload.
    pub fn merge_with_defaults(self) -> AiPayload {
        AiPayload {
            response: self.response.unwrap_or_else(placeholder),
            summary: self.summary.unwrap_or_else(placeholder),
            action: self.action.unwrap_or_else(placeholder),
        }
    }
}

fn placeholder() -> Value {
    Value::String(PLACEHOLDER.to_string())
}

impl AiPayload {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("payload serializes to JSON")
    }

    pub fn response_text(&self) -> String {
        field_text(&self.response)
    }

    pub fn summary_text(&self) -> String {
        field_text(&self.summary)
    }

    pub fn action_text(&self) -> String {
        field_text(&self.action)
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Canned payload used when the provider could not be invoked at all.
pub fn provider_fallback(review_text: &str, rating: i32) -> AiPayload {
    let excerpt: String = review_text.chars().take(100).collect();
    AiPayload {
        response: "Thank you for your feedback. We appreciate you taking the time to share your experience with us."
            .into(),
        summary: format!("Customer rated {rating} stars: {excerpt}").into(),
        action: if rating <= 3 {
            "Review customer feedback".into()
        } else {
            "No immediate action required".into()
        },
    }
}

/// Canned payload used when model output is not valid JSON.
pub fn parse_fallback(rating: i32) -> AiPayload {
    AiPayload {
        response: "Thank you for your feedback. We value your input.".into(),
        summary: format!("Customer rated {rating} stars").into(),
        action: "Review feedback".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_fills_missing_keys() {
        let partial: PartialAiPayload =
            serde_json::from_str(r#"{"summary": "short"}"#).unwrap();
        let full = partial.merge_with_defaults();
        assert_eq!(full.response, "N/A");
        assert_eq!(full.summary, "short");
        assert_eq!(full.action, "N/A");
    }

    #[test]
    fn non_string_values_pass_through() {
        let partial: PartialAiPayload =
            serde_json::from_str(r#"{"response": 5, "summary": "s", "action": "a"}"#).unwrap();
        let full = partial.merge_with_defaults();
        assert_eq!(full.response, json!(5));
        assert_eq!(full.response_text(), "5");
        assert_eq!(full.summary_text(), "s");
    }

    #[test]
    fn provider_fallback_truncates_excerpt_to_100_chars() {
        let review = "é".repeat(150);
        let payload = provider_fallback(&review, 2);
        let summary = payload.summary_text();
        let excerpt = summary.strip_prefix("Customer rated 2 stars: ").unwrap();
        assert_eq!(excerpt.chars().count(), 100);
    }

    #[test]
    fn provider_fallback_action_depends_on_rating_band() {
        assert_eq!(
            provider_fallback("fine", 3).action_text(),
            "Review customer feedback"
        );
        assert_eq!(
            provider_fallback("fine", 4).action_text(),
            "No immediate action required"
        );
    }

    #[test]
    fn parse_fallback_substitutes_rating() {
        let payload = parse_fallback(4);
        assert_eq!(payload.summary, "Customer rated 4 stars");
        assert_eq!(payload.action, "Review feedback");
    }
}
