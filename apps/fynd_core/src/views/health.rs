use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
}

/// Health check endpoint for deployment monitoring. Touches neither the
/// database nor the AI provider.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: "fynd-feedback-api",
    })
}
