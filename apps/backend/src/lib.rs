pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use studydeck_core::{ReviewScheduler, Sm2};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{CardStore, Database, MemoryStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CardStore>,
    pub scheduler: Arc<dyn ReviewScheduler>,
}

impl AppState {
    pub fn new(store: Arc<dyn CardStore>, scheduler: Arc<dyn ReviewScheduler>) -> Self {
        Self { store, scheduler }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // User routes
        .route("/api/users/me", get(routes::users::me))
        // Card routes
        .route("/api/cards", post(routes::cards::create))
        .route("/api/cards/:id", get(routes::cards::get))
        .route("/api/cards/:id/reviews", get(routes::cards::reviews))
        // Study routes
        .route("/api/cards/:id/review", post(routes::study::review))
        .route("/api/study/due", get(routes::study::due))
        // Scheduler routes
        .route("/api/scheduler/preview", post(routes::scheduler::preview))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: Arc<dyn CardStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url, config.max_connections).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            Arc::new(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data will not persist");
            Arc::new(MemoryStore::new())
        }
    };

    let scheduler = Sm2::with_scale(config.quality_scale);
    tracing::info!(
        scheduler = scheduler.name(),
        quality_scale = config.quality_scale.as_str(),
        "Scheduler configured"
    );

    let app = router(AppState::new(store, Arc::new(scheduler)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
