pub mod admin;
pub mod health;
pub mod review;

use axum::{http::StatusCode, Json};

use crate::serializers::review::ApiError;

pub(crate) fn bad(msg: &str) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError { error: msg.into() }))
}

pub(crate) fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            error: e.to_string(),
        }),
    )
}
