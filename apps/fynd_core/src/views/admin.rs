use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::internal;
use crate::models::review::{Column as ReviewCol, Entity as Review};
use crate::serializers::review::{Analytics, AnalyticsResp, ApiError, ReviewPublic, ReviewsResp};
use crate::AppState;

/// All reviews for the admin dashboard, newest first.
pub async fn reviews(
    State(state): State<AppState>,
) -> Result<Json<ReviewsResp>, (StatusCode, Json<ApiError>)> {
    let rows = Review::find()
        .order_by_desc(ReviewCol::CreatedAt)
        .order_by_desc(ReviewCol::Id)
        .all(&state.db)
        .await
        .map_err(internal)?;

    Ok(Json(ReviewsResp {
        success: true,
        count: rows.len(),
        reviews: rows.into_iter().map(ReviewPublic::from).collect(),
    }))
}

/// Aggregate stats for the admin dashboard.
pub async fn analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResp>, (StatusCode, Json<ApiError>)> {
    let total_reviews = Review::find().count(&state.db).await.map_err(internal)?;

    let mut rating_distribution = BTreeMap::new();
    for rating in 1..=5 {
        let count = Review::find()
            .filter(ReviewCol::Rating.eq(rating))
            .count(&state.db)
            .await
            .map_err(internal)?;
        rating_distribution.insert(rating.to_string(), count);
    }

    let average_rating = if total_reviews > 0 {
        let rows = Review::find().all(&state.db).await.map_err(internal)?;
        let sum: i64 = rows.iter().map(|r| i64::from(r.rating)).sum();
        round2(sum as f64 / total_reviews as f64)
    } else {
        0.0
    };

    Ok(Json(AnalyticsResp {
        success: true,
        analytics: Analytics {
            total_reviews,
            average_rating,
            rating_distribution,
        },
    }))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(11.0 / 3.0), 3.67);
        assert_eq!(round2(4.0), 4.0);
        assert_eq!(round2(4.125), 4.13);
    }
}
