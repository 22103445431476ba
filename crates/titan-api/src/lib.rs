//! Form-Titan HTTP API
//!
//! JSON transport around the form engine. Every handler goes through the
//! [`FormStore`] held in [`AppState`]; the engine itself is called
//! synchronously per request.
//!
//! ```text
//! GET  /health
//! GET  /api/
//! GET  /api/forms/:form_id
//! PUT  /api/forms/:form_id
//! POST /api/forms/:form_id/validate
//! GET  /api/forms/:form_id/submissions?limit=N
//! POST /api/forms/:form_id/submissions
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use titan_forms::FormStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

/// Shared handler state
pub struct AppState {
    pub store: Arc<dyn FormStore>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn FormStore>, config: ServerConfig) -> Self {
        Self { store, config }
    }
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    let cors_allow_any = state.config.cors_allow_any;
    let router = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api", get(routes::health::api_root))
        .route("/api/", get(routes::health::api_root))
        .nest("/api/forms", routes::forms::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state));

    if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
