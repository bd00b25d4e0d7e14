//! Capacity-bounded, order-preserving favorites list.

use thiserror::Error;

use crate::track::Track;
use crate::FAVORITES_CAPACITY;

/// Reasons an addition was refused. The display text is the notice shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoritesError {
    #[error("list is full")]
    Full,
    #[error("already added")]
    Duplicate,
}

/// Favorites selected during a session, unique by track id.
///
/// Lives only as long as the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    tracks: Vec<Track>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track, unless the list is full or already holds its id.
    pub fn add(&mut self, track: Track) -> Result<(), FavoritesError> {
        if self.is_full() {
            return Err(FavoritesError::Full);
        }
        if self.contains(&track.id) {
            return Err(FavoritesError::Duplicate);
        }

        tracing::debug!(id = %track.id, count = self.tracks.len() + 1, "Added favorite");
        self.tracks.push(track);
        Ok(())
    }

    /// Remove the track with the given id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        before != self.tracks.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tracks.len() >= FAVORITES_CAPACITY
    }

    /// Analysis is offered only when the list holds exactly the capacity.
    pub fn can_analyze(&self) -> bool {
        self.tracks.len() == FAVORITES_CAPACITY
    }

    /// Tracks in insertion order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
