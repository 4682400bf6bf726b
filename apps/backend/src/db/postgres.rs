//! PostgreSQL database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use studydeck_core::{CardSchedulingState, ReviewScheduler};
use uuid::Uuid;

use super::{CardStore, ReviewedCard};
use crate::error::Result;
use crate::models::*;

const CARD_COLUMNS: &str = "id, user_id, question, answer, interval_days, ease_factor, \
                            next_review_at, created_at, updated_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CardStore for Database {
    async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, token, name)
            VALUES ($1, $2, $3)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn touch_user(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create_card(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
        state: &CardSchedulingState,
    ) -> Result<DbCard> {
        let query = format!(
            r#"
            INSERT INTO cards (user_id, question, answer, interval_days, ease_factor, next_review_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CARD_COLUMNS}
            "#
        );
        let card = sqlx::query_as::<_, DbCard>(&query)
            .bind(user_id)
            .bind(question)
            .bind(answer)
            .bind(interval_column(state.interval_days)?)
            .bind(state.ease_factor)
            .bind(state.next_review_date)
            .fetch_one(&self.pool)
            .await?;

        Ok(card)
    }

    async fn get_card(&self, user_id: Uuid, card_id: i64) -> Result<Option<DbCard>> {
        let query = format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = $1 AND user_id = $2");
        let card = sqlx::query_as::<_, DbCard>(&query)
            .bind(card_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(card)
    }

    async fn due_cards(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DbCard>> {
        let query = format!(
            r#"
            SELECT {CARD_COLUMNS}
            FROM cards
            WHERE user_id = $1 AND next_review_at <= $2
            ORDER BY next_review_at, id
            LIMIT $3
            "#
        );
        let cards = sqlx::query_as::<_, DbCard>(&query)
            .bind(user_id)
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(cards)
    }

    async fn apply_review(
        &self,
        user_id: Uuid,
        card_id: i64,
        quality: i64,
        scheduler: &dyn ReviewScheduler,
        now: DateTime<Utc>,
    ) -> Result<Option<ReviewedCard>> {
        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = $1 AND user_id = $2 FOR UPDATE"
        );
        let card = sqlx::query_as::<_, DbCard>(&query)
            .bind(card_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut card) = card else {
            return Ok(None);
        };

        let before = card.scheduling_state()?;
        let after = scheduler.schedule(&before, quality, now)?;
        card.set_scheduling_state(&after, now)?;

        sqlx::query(
            r#"
            UPDATE cards
            SET interval_days = $1, ease_factor = $2, next_review_at = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(card.interval_days)
        .bind(card.ease_factor)
        .bind(card.next_review_at)
        .bind(card.updated_at)
        .bind(card.id)
        .execute(&mut *tx)
        .await?;

        let review = DbReview::new(card.id, user_id, quality, &before, &after, now)?;
        sqlx::query(
            r#"
            INSERT INTO reviews (id, card_id, user_id, quality, interval_before, interval_after,
                                 ease_before, ease_after, reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(review.id)
        .bind(review.card_id)
        .bind(review.user_id)
        .bind(review.quality)
        .bind(review.interval_before)
        .bind(review.interval_after)
        .bind(review.ease_before)
        .bind(review.ease_after)
        .bind(review.reviewed_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(ReviewedCard { card, review }))
    }

    async fn reviews_for_card(&self, user_id: Uuid, card_id: i64) -> Result<Vec<DbReview>> {
        let reviews = sqlx::query_as::<_, DbReview>(
            r#"
            SELECT id, card_id, user_id, quality, interval_before, interval_after,
                   ease_before, ease_after, reviewed_at
            FROM reviews
            WHERE card_id = $1 AND user_id = $2
            ORDER BY seq
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
