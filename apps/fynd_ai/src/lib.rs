pub mod normalize;
pub mod payload;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::normalize::normalize;
use crate::payload::provider_fallback;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Every provider failure the client can see, collapsed into one class so
/// callers handle them uniformly.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("request to AI provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("AI provider returned no candidate text")]
    EmptyResponse,
}

/// Client for the generative-language provider. Built once at startup and
/// passed into the HTTP app.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, model, DEFAULT_BASE_URL)
    }

    pub fn with_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Generate the `{response, summary, action}` payload for a review.
    ///
    /// Total: invocation failures degrade to a canned payload without
    /// touching the normalizer. Returns a JSON-encoded string the caller
    /// re-parses itself.
    pub async fn generate(&self, review_text: &str, rating: i32) -> String {
        let prompt = build_prompt(review_text, rating);
        match self.invoke(&prompt).await {
            Ok(raw) => normalize(&raw, rating),
            Err(err) => {
                warn!(error = %err, "AI provider call failed, using canned payload");
                provider_fallback(review_text, rating).to_json()
            }
        }
    }

    async fn invoke(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
        };

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AiError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let out: GenerateContentResponse = resp.json().await?;
        let text: String = out
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text)
    }
}

fn build_prompt(review_text: &str, rating: i32) -> String {
    format!(
        r#"You are a customer service AI for Fynd, an e-commerce platform.

User Rating: {rating}/5
User Review: "{review_text}"

Generate a JSON response with exactly these fields:
1. "response": A personalized, empathetic response to the customer (2-3 sentences)
2. "summary": A brief summary of the review in 1 sentence
3. "action": Recommended action for the admin team (e.g., "Follow up within 24 hours", "No action needed", "Escalate to manager")

Respond ONLY with valid JSON in this exact format:
{{
  "response": "<your response>",
  "summary": "<summary>",
  "action": "<recommended action>"
}}"#
    )
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn prompt_embeds_rating_and_review() {
        let prompt = build_prompt("arrived two days late", 2);
        assert!(prompt.contains("User Rating: 2/5"));
        assert!(prompt.contains("\"arrived two days late\""));
        assert!(prompt.contains("Respond ONLY with valid JSON"));
    }

    #[tokio::test]
    async fn generate_degrades_to_canned_payload_when_unreachable() {
        // Nothing listens on the discard port, so the call fails fast.
        let client = AiClient::with_endpoint("test-key", "test-model", "http://127.0.0.1:9");
        let raw = client.generate("slow delivery", 2).await;
        let body: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(body["summary"], "Customer rated 2 stars: slow delivery");
        assert_eq!(body["action"], "Review customer feedback");
        assert!(body["response"].as_str().unwrap().starts_with("Thank you"));
    }

    #[tokio::test]
    async fn generate_uses_no_action_band_for_high_ratings() {
        let client = AiClient::with_endpoint("test-key", "test-model", "http://127.0.0.1:9");
        let raw = client.generate("love it", 5).await;
        let body: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(body["action"], "No immediate action required");
    }
}
