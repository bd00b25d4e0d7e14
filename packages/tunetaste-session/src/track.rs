use serde::{Deserialize, Serialize};

/// A single catalog recording as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier, unique per recording
    pub id: String,
    /// Recording title
    pub name: String,
    /// Comma-joined artist credits
    pub artist: String,
    /// Resolved cover URL or the default cover sentinel
    pub image: String,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            image: image.into(),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Tracks in upstream relevance order
    pub tracks: Vec<Track>,
    /// Total number of matches reported by the catalog
    pub total: u32,
}

impl SearchResult {
    /// Whether further pages exist after the page starting at `offset`.
    pub fn has_more(&self, offset: u32, limit: u32) -> bool {
        u64::from(offset) + u64::from(limit) < u64::from(self.total)
    }
}
