//! Axum router for the interactions endpoint.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{handle_interaction, health, InteractionAppState};

/// Create the interactions router.
///
/// # Routes
/// - `POST /interactions` - Signed platform interactions
/// - `GET /health` - Liveness probe
pub fn interactions_router(state: InteractionAppState) -> Router {
    Router::new()
        .route("/interactions", post(handle_interaction))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
