//! Favorites analysis endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tunetaste_session::{Track, FAVORITES_CAPACITY};

use crate::error::{AppError, Result};
use crate::AppState;

/// Successful relay response.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub status: &'static str,
    /// Analysis service response, unmodified
    pub analysis: Value,
}

/// POST /favorites
///
/// Relays the favorites list to the analysis service. Lists longer than the
/// favorites capacity are rejected; shorter ones are passed through.
pub async fn submit_favorites(
    State(state): State<AppState>,
    Json(favorites): Json<Vec<Track>>,
) -> Result<Json<RelayResponse>> {
    if favorites.len() > FAVORITES_CAPACITY {
        return Err(AppError::BadRequest("too many favorites".to_string()));
    }

    let analysis = state.relay().analyze(&favorites).await?;

    tracing::info!(count = favorites.len(), "Favorites analyzed");

    Ok(Json(RelayResponse {
        status: "ok",
        analysis,
    }))
}
