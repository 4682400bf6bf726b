//! Study endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

const DEFAULT_DUE_LIMIT: i64 = 50;
const MAX_DUE_LIMIT: i64 = 500;

/// GET /api/study/due
pub async fn due(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<DueCardsQuery>,
) -> Result<Json<DueCardsResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_DUE_LIMIT);
    if limit < 1 {
        return Err(ApiError::BadRequest("limit must be at least 1".to_string()));
    }

    let cards = state
        .store
        .due_cards(auth.user_id, Utc::now(), limit.min(MAX_DUE_LIMIT))
        .await?;

    Ok(Json(DueCardsResponse {
        count: cards.len(),
        cards: cards.iter().map(DbCard::to_api_card).collect(),
    }))
}

/// POST /api/cards/:id/review
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
    payload: std::result::Result<Json<SubmitReviewRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>> {
    let Json(payload) = payload?;
    let quality = payload.quality().map_err(|reason| {
        tracing::warn!(card_id, "review rejected: {}", reason);
        ApiError::from(reason)
    })?;

    let now = Utc::now();
    let reviewed = state
        .store
        .apply_review(auth.user_id, card_id, quality, state.scheduler.as_ref(), now)
        .await
        .map_err(|e| {
            if let ApiError::InvalidInput(reason) = &e {
                tracing::warn!(card_id, quality, "review rejected: {}", reason);
            }
            e
        })?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let review = &reviewed.review;
    tracing::info!(
        card_id,
        quality = review.quality,
        interval_before = review.interval_before,
        interval_after = review.interval_after,
        ease_after = review.ease_after,
        "review applied"
    );

    let next = reviewed.card.scheduling_state()?;
    Ok(Json(ScheduleResponse::from_state(Some(card_id), &next)))
}
