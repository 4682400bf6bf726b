//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studydeck_core::SchedulerError;
use uuid::Uuid;

// Re-export shared types from studydeck-core
pub use studydeck_core::types::CardSchedulingState;

/// Interval as stored in an `INTEGER` column.
pub fn interval_column(interval_days: u32) -> studydeck_core::Result<i32> {
    i32::try_from(interval_days).map_err(|_| SchedulerError::InvalidInterval {
        interval_days: i64::from(interval_days),
    })
}

/// Rating as sent by a client. Anything but a JSON integer is invalid input.
fn rating(value: &serde_json::Value) -> studydeck_core::Result<i64> {
    value.as_i64().ok_or_else(|| SchedulerError::InvalidQuality {
        quality: value.to_string(),
    })
}

// === Database Entity Types ===

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Flashcard with its scheduling columns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCard {
    pub id: i64,
    pub user_id: Uuid,
    pub question: String,
    pub answer: String,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub next_review_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbCard {
    /// Read the persisted scheduling state, rejecting corrupt rows.
    pub fn scheduling_state(&self) -> studydeck_core::Result<CardSchedulingState> {
        CardSchedulingState::from_parts(
            i64::from(self.interval_days),
            self.ease_factor,
            self.next_review_at,
        )
    }

    /// Overwrite the scheduling columns with a freshly computed state.
    /// Leaves the row untouched when the interval does not fit the column.
    pub fn set_scheduling_state(
        &mut self,
        state: &CardSchedulingState,
        now: DateTime<Utc>,
    ) -> studydeck_core::Result<()> {
        self.interval_days = interval_column(state.interval_days)?;
        self.ease_factor = state.ease_factor;
        self.next_review_at = state.next_review_date;
        self.updated_at = now;
        Ok(())
    }

    /// Convert to API card type
    pub fn to_api_card(&self) -> Card {
        Card {
            id: self.id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            interval_days: self.interval_days,
            ease_factor: self.ease_factor,
            next_review_date: self.next_review_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// One entry of the review audit log
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub card_id: i64,
    pub user_id: Uuid,
    pub quality: i32,
    pub interval_before: i32,
    pub interval_after: i32,
    pub ease_before: f64,
    pub ease_after: f64,
    pub reviewed_at: DateTime<Utc>,
}

impl DbReview {
    /// Record a transition of `card_id` from `before` to `after`.
    pub fn new(
        card_id: i64,
        user_id: Uuid,
        quality: i64,
        before: &CardSchedulingState,
        after: &CardSchedulingState,
        reviewed_at: DateTime<Utc>,
    ) -> studydeck_core::Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            card_id,
            user_id,
            quality: i32::try_from(quality)
                .map_err(|_| SchedulerError::InvalidQuality {
                    quality: quality.to_string(),
                })?,
            interval_before: interval_column(before.interval_days)?,
            interval_after: interval_column(after.interval_days)?,
            ease_before: before.ease_factor,
            ease_after: after.ease_factor,
            reviewed_at,
        })
    }
}

// === API Request/Response Types ===

/// Card as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub next_review_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueCardsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueCardsResponse {
    pub cards: Vec<Card>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub quality: serde_json::Value,
}

impl SubmitReviewRequest {
    pub fn quality(&self) -> studydeck_core::Result<i64> {
        rating(&self.quality)
    }
}

/// Scheduler input carried over HTTP when the caller already holds the state.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub card_id: Option<i64>,
    pub current_interval_days: i64,
    pub current_ease_factor: f64,
    pub quality: serde_json::Value,
}

impl PreviewRequest {
    pub fn quality(&self) -> studydeck_core::Result<i64> {
        rating(&self.quality)
    }
}

/// Scheduler output
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<i64>,
    pub new_interval_days: u32,
    pub new_ease_factor: f64,
    pub new_next_review_date: DateTime<Utc>,
}

impl ScheduleResponse {
    pub fn from_state(card_id: Option<i64>, state: &CardSchedulingState) -> Self {
        Self {
            card_id,
            new_interval_days: state.interval_days,
            new_ease_factor: state.ease_factor,
            new_next_review_date: state.next_review_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewHistoryResponse {
    pub card_id: i64,
    pub reviews: Vec<DbReview>,
}
