use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::models::review;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResp {
    pub success: bool,
    /// Echo of the customer-facing AI response, as generated.
    pub message: Value,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewPublic {
    pub id: i64,
    pub rating: i32,
    pub review: String,
    pub ai_response: String,
    pub ai_summary: String,
    pub ai_action: String,
    pub created_at: String,
}

impl From<review::Model> for ReviewPublic {
    fn from(m: review::Model) -> Self {
        Self {
            id: m.id,
            rating: m.rating,
            review: m.review,
            ai_response: m.ai_response,
            ai_summary: m.ai_summary,
            ai_action: m.ai_action,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewsResp {
    pub success: bool,
    pub count: usize,
    pub reviews: Vec<ReviewPublic>,
}

#[derive(Debug, Serialize)]
pub struct Analytics {
    pub total_reviews: u64,
    pub average_rating: f64,
    /// Keys "1".."5", each the number of reviews with that rating.
    pub rating_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResp {
    pub success: bool,
    pub analytics: Analytics,
}
