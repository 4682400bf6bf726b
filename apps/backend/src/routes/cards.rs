//! Flashcard authoring endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::{Card, CreateCardRequest, ReviewHistoryResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/cards
/// New cards start at a one-day interval and are due immediately
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    payload: std::result::Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>)> {
    let Json(payload) = payload?;
    let question = payload.question.trim();
    let answer = payload.answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::BadRequest(
            "question and answer must not be empty".to_string(),
        ));
    }

    let initial = state.scheduler.initial_state(Utc::now());
    let card = state
        .store
        .create_card(auth.user_id, question, answer, &initial)
        .await?;

    tracing::debug!(card_id = card.id, user_id = %auth.user_id, "card created");

    Ok((StatusCode::CREATED, Json(card.to_api_card())))
}

/// GET /api/cards/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
) -> Result<Json<Card>> {
    let card = state
        .store
        .get_card(auth.user_id, card_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    Ok(Json(card.to_api_card()))
}

/// GET /api/cards/:id/reviews
pub async fn reviews(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
) -> Result<Json<ReviewHistoryResponse>> {
    // 404 for cards the user does not own rather than an empty log
    state
        .store
        .get_card(auth.user_id, card_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let reviews = state.store.reviews_for_card(auth.user_id, card_id).await?;

    Ok(Json(ReviewHistoryResponse { card_id, reviews }))
}
