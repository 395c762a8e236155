// --- File: crates/services/schedbot_backend/src/lib.rs ---
//! HTTP surface of schedbot.
//!
//! Currently a single health endpoint reporting which settings are present.

use axum::{routing::get, Router};
use schedbot_config::Settings;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

/// Build the application router.
pub fn app(settings: Arc<Settings>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(settings)
}
