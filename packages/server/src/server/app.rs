//! Application setup and router assembly.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    dashboard_handler, generate_insights_handler, health_handler, list_documents_handler,
    list_insights_handler, upload_document_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,

    /// Present in production wiring; absent when tests run on the
    /// in-memory store.
    pub db_pool: Option<PgPool>,
}

/// Build the Axum application router.
///
/// All handlers read shared state from an `Extension`, so tests can wire
/// the in-memory store and mock model through the same code path as
/// production.
pub fn build_app(deps: Arc<ServerDeps>, db_pool: Option<PgPool>) -> Router {
    let state = AppState { deps, db_pool };

    // CORS: the dashboard UI is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/documents",
            post(upload_document_handler).get(list_documents_handler),
        )
        .route("/api/insights", get(list_insights_handler))
        .route("/api/insights/generate", post(generate_insights_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
