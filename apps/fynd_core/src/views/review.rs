use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use fynd_ai::payload::AiPayload;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use serde_json::Value;
use tracing::warn;

use super::{bad, internal};
use crate::models::review;
use crate::serializers::review::{ApiError, SubmitResp};
use crate::AppState;

const MAX_REVIEW_CHARS: usize = 2000;

/// Submit a new review and get an AI-generated response.
pub async fn submit(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<SubmitResp>), (StatusCode, Json<ApiError>)> {
    let Some(Json(data)) = body else {
        return Err(bad("No data provided"));
    };
    let Some(fields) = data.as_object().filter(|m| !m.is_empty()) else {
        return Err(bad("No data provided"));
    };

    let review_text = fields
        .get("review")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();
    if review_text.is_empty() {
        return Err(bad("Review text is required"));
    }

    let rating = match fields.get("rating").and_then(Value::as_i64) {
        Some(r) if (1..=5).contains(&r) => r as i32,
        _ => return Err(bad("Valid rating (1-5) is required")),
    };

    // The model and the stored row both see the truncated text.
    let review_text: String = review_text.chars().take(MAX_REVIEW_CHARS).collect();

    let raw = state.ai.generate(&review_text, rating).await;
    let payload = match serde_json::from_str::<AiPayload>(&raw) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "AI payload did not decode, using rating-band fallback");
            rating_band_fallback(rating)
        }
    };

    let created = review::ActiveModel {
        id: NotSet,
        rating: Set(rating),
        review: Set(review_text),
        ai_response: Set(payload.response_text()),
        ai_summary: Set(payload.summary_text()),
        ai_action: Set(payload.action_text()),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await
    .map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResp {
            success: true,
            message: payload.response,
            id: created.id,
        }),
    ))
}

/// Second fallback tier: guards the decode of the client's returned string.
/// Its per-band copy is intentionally distinct from the client's own
/// fallback.
fn rating_band_fallback(rating: i32) -> AiPayload {
    if rating >= 4 {
        AiPayload {
            response:
                "Thank you for your positive feedback! We're glad you had a great experience with Fynd."
                    .into(),
            summary: format!("Positive {rating}-star review from customer").into(),
            action: "No immediate action required".into(),
        }
    } else if rating == 3 {
        AiPayload {
            response:
                "Thank you for your feedback. We appreciate your honest review and will work to improve."
                    .into(),
            summary: format!("Neutral {rating}-star review from customer").into(),
            action: "Review feedback for improvements".into(),
        }
    } else {
        AiPayload {
            response:
                "We're sorry to hear about your experience. Your feedback is important and we'll work to address your concerns."
                    .into(),
            summary: format!("Negative {rating}-star review requiring attention").into(),
            action: "Follow up with customer within 24 hours".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_fallback_selects_by_rating() {
        assert_eq!(
            rating_band_fallback(5).action_text(),
            "No immediate action required"
        );
        assert_eq!(
            rating_band_fallback(3).action_text(),
            "Review feedback for improvements"
        );
        assert_eq!(
            rating_band_fallback(1).action_text(),
            "Follow up with customer within 24 hours"
        );
    }

    #[test]
    fn band_fallback_summary_names_the_rating() {
        assert_eq!(
            rating_band_fallback(2).summary_text(),
            "Negative 2-star review requiring attention"
        );
    }
}
