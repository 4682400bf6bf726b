//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to a store and scheduler
//! - Helpers for creating users and cards
//! - Authentication helpers
//!
//! Most tests run against the in-memory store. Tests built with
//! [`TestContext::postgres`] need a PostgreSQL database (set DATABASE_URL).

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use uuid::Uuid;

use studydeck_backend::db::{CardStore, Database, MemoryStore};
use studydeck_backend::{router, AppState};
use studydeck_core::{CardSchedulingState, QualityScale, Sm2};

/// Test context containing the store and the router under test.
pub struct TestContext {
    pub store: Arc<dyn CardStore>,
    app: Router,
}

impl TestContext {
    /// In-memory store, practice quality scale (1-5).
    pub fn new() -> Self {
        Self::with_scale(QualityScale::Practice)
    }

    /// In-memory store with the given quality scale.
    pub fn with_scale(scale: QualityScale) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), scale)
    }

    /// PostgreSQL store.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn postgres() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 10)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::with_store(Arc::new(db), QualityScale::Practice)
    }

    fn with_store(store: Arc<dyn CardStore>, scale: QualityScale) -> Self {
        let state = AppState::new(store.clone(), Arc::new(Sm2::with_scale(scale)));
        Self {
            store,
            app: router(state),
        }
    }

    /// Test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).expect("Failed to start test server")
    }

    /// Create a test user and return its ID and token.
    pub async fn create_test_user(&self, name: Option<&str>) -> (Uuid, String) {
        let user = self
            .store
            .create_user(name)
            .await
            .expect("Failed to create test user");
        (user.id, user.token)
    }

    /// Create a fresh card for `user_id` and return its ID.
    pub async fn create_test_card(&self, user_id: Uuid) -> i64 {
        let state = CardSchedulingState::new_card(Utc::now());
        self.store
            .create_card(user_id, "What is the powerhouse of the cell?", "Mitochondria", &state)
            .await
            .expect("Failed to create test card")
            .id
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is a valid header")
    }
}
