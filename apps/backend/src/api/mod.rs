//! API endpoint handlers for the Tunetaste server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod favorites;
pub mod search;

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(crate::health_check))
        .route("/search", get(search::search_tracks))
        .route("/favorites", post(favorites::submit_favorites))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
