//! Track search endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tunetaste_session::{query::parse_offset, SearchQuery, SearchResult};

use crate::error::Result;
use crate::AppState;

/// Query parameters for track search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub artist: Option<String>,
    pub title: Option<String>,
    /// Kept raw so that malformed values fall back to 0 instead of a 400.
    pub offset: Option<String>,
}

/// GET /search
///
/// Searches the catalog by artist and/or title, ten tracks per page.
pub async fn search_tracks(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>> {
    let query = SearchQuery::new(
        params.artist.as_deref(),
        params.title.as_deref(),
        parse_offset(params.offset.as_deref()),
    );

    let result = state.search().search(&query).await?;
    Ok(Json(result))
}
