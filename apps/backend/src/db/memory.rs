//! In-process card store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use studydeck_core::{CardSchedulingState, ReviewScheduler};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CardStore, ReviewedCard};
use crate::error::Result;
use crate::models::{DbCard, DbReview, User};

/// Card store kept in process memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    cards: BTreeMap<i64, DbCard>,
    reviews: Vec<DbReview>,
    last_card_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            name: name.map(str::to_string),
            created_at: now,
            last_seen_at: now,
        };

        let mut inner = self.inner.write().await;
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.token == token).cloned())
    }

    async fn touch_user(&self, user_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.get_mut(&user_id) {
            user.last_seen_at = Utc::now();
        }
        Ok(())
    }

    async fn create_card(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
        state: &CardSchedulingState,
    ) -> Result<DbCard> {
        let now = Utc::now();
        let mut inner = self.inner.write().await;
        inner.last_card_id += 1;

        let mut card = DbCard {
            id: inner.last_card_id,
            user_id,
            question: question.to_string(),
            answer: answer.to_string(),
            interval_days: 0,
            ease_factor: 0.0,
            next_review_at: now,
            created_at: now,
            updated_at: now,
        };
        card.set_scheduling_state(state, now)?;
        inner.cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn get_card(&self, user_id: Uuid, card_id: i64) -> Result<Option<DbCard>> {
        let inner = self.inner.read().await;
        Ok(inner
            .cards
            .get(&card_id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    async fn due_cards(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DbCard>> {
        let inner = self.inner.read().await;
        let mut due: Vec<DbCard> = inner
            .cards
            .values()
            .filter(|c| c.user_id == user_id && c.next_review_at <= now)
            .cloned()
            .collect();
        due.sort_by(|a, b| a.next_review_at.cmp(&b.next_review_at).then(a.id.cmp(&b.id)));
        due.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(due)
    }

    async fn apply_review(
        &self,
        user_id: Uuid,
        card_id: i64,
        quality: i64,
        scheduler: &dyn ReviewScheduler,
        now: DateTime<Utc>,
    ) -> Result<Option<ReviewedCard>> {
        // Held across read, compute and write.
        let mut inner = self.inner.write().await;

        let Some(card) = inner
            .cards
            .get_mut(&card_id)
            .filter(|c| c.user_id == user_id)
        else {
            return Ok(None);
        };

        let before = card.scheduling_state()?;
        let after = scheduler.schedule(&before, quality, now)?;
        let review = DbReview::new(card_id, user_id, quality, &before, &after, now)?;
        card.set_scheduling_state(&after, now)?;
        let card = card.clone();

        inner.reviews.push(review.clone());

        Ok(Some(ReviewedCard { card, review }))
    }

    async fn reviews_for_card(&self, user_id: Uuid, card_id: i64) -> Result<Vec<DbReview>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|r| r.card_id == card_id && r.user_id == user_id)
            .cloned()
            .collect())
    }
}
