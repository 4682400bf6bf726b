//! Card storage.
//!
//! The service only talks to storage through [`CardStore`]. PostgreSQL backs
//! production; [`MemoryStore`] backs tests and database-less local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use studydeck_core::{CardSchedulingState, ReviewScheduler};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{DbCard, DbReview, User};

pub use memory::MemoryStore;
pub use postgres::Database;

/// Card state after a review was applied, with its audit entry.
#[derive(Debug, Clone)]
pub struct ReviewedCard {
    pub card: DbCard,
    pub review: DbReview,
}

#[async_trait]
pub trait CardStore: Send + Sync {
    // === Users ===

    /// Create a user with a fresh bearer token
    async fn create_user(&self, name: Option<&str>) -> Result<User>;

    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>>;

    /// Update last_seen_at
    async fn touch_user(&self, user_id: Uuid) -> Result<()>;

    // === Cards ===

    async fn create_card(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
        state: &CardSchedulingState,
    ) -> Result<DbCard>;

    /// Get a card owned by `user_id`
    async fn get_card(&self, user_id: Uuid, card_id: i64) -> Result<Option<DbCard>>;

    /// Cards due at `now`, earliest first
    async fn due_cards(&self, user_id: Uuid, now: DateTime<Utc>, limit: i64)
        -> Result<Vec<DbCard>>;

    // === Reviews ===

    /// Apply one review as a single read-modify-write on the card.
    ///
    /// The current state is read under a per-card lock, passed through
    /// `scheduler`, and written back together with an audit entry. When the
    /// scheduler rejects the input nothing is written. Returns `None` when the
    /// user owns no such card.
    async fn apply_review(
        &self,
        user_id: Uuid,
        card_id: i64,
        quality: i64,
        scheduler: &dyn ReviewScheduler,
        now: DateTime<Utc>,
    ) -> Result<Option<ReviewedCard>>;

    /// Audit log for a card, oldest first
    async fn reviews_for_card(&self, user_id: Uuid, card_id: i64) -> Result<Vec<DbReview>>;
}
