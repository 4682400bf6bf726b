//! Stateless scheduling endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use studydeck_core::CardSchedulingState;

use crate::error::Result;
use crate::models::{PreviewRequest, ScheduleResponse};
use crate::AppState;

/// POST /api/scheduler/preview
/// Runs the scheduler on caller-supplied state without touching storage
pub async fn preview(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>> {
    let Json(payload) = payload?;
    // Quality is checked before the state it would be applied to.
    let quality = payload.quality()?;

    let now = Utc::now();
    let current = CardSchedulingState::from_parts(
        payload.current_interval_days,
        payload.current_ease_factor,
        now,
    )?;
    let next = state.scheduler.schedule(&current, quality, now)?;

    Ok(Json(ScheduleResponse::from_state(payload.card_id, &next)))
}
