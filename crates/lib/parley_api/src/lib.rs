//! # parley_api
//!
//! HTTP API library for Parley.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use parley_core::llm::TextGenerator;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{chat, health, survey};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// Language model that voices the scripted prompts.
    pub generator: Arc<dyn TextGenerator>,
}

/// Run embedded database migrations.
///
/// Delegates to `parley_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    parley_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/survey", post(survey::submit_survey_handler))
        .route("/chat", post(chat::chat_handler))
        .route("/chat/{session_id}/messages", get(chat::transcript_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
