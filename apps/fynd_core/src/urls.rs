use axum::{
    routing::{get, post},
    Router,
};

use crate::views::{
    admin::{analytics, reviews},
    health::health,
    review::submit,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/submit", post(submit))
        .route("/admin/reviews", get(reviews))
        .route("/admin/analytics", get(analytics))
}
