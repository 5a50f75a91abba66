//! jop-api library - Joy of Painting episode API
//!
//! Read-only JSON API over the document store built by jop-etl: episode
//! listing and lookup, month/subject/color filtering, aggregate tables,
//! health and usage statistics.

use axum::routing::get;
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod filter;
pub mod pagination;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::api_documentation))
        .route("/episodes", get(api::list_episodes))
        .route(
            "/episodes/filter",
            get(api::filter_episodes_get).post(api::filter_episodes_post),
        )
        .route("/episodes/:id", get(api::get_episode))
        .route("/colors", get(api::list_colors))
        .route("/subjects", get(api::list_subjects))
        .route("/stats", get(api::get_stats))
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
