//! User registration and profile endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::{RegisterUserRequest, RegisterUserResponse, UserResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/users/register
/// Creates a new user and returns the bearer token
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Option<RegisterUserRequest>>, JsonRejection>,
) -> Result<Json<RegisterUserResponse>> {
    let Json(payload) = payload?;
    let name = payload.and_then(|p| p.name);
    let user = state.store.create_user(name.as_deref()).await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(RegisterUserResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/users/me
pub async fn me(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>> {
    let user = state
        .store
        .get_user_by_token(&auth.token)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        user_id: user.id,
        name: user.name,
        created_at: user.created_at,
        last_seen_at: user.last_seen_at,
    }))
}
