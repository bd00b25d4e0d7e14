//! Search aggregation: one catalog query, then a cover probe per match.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tunetaste_session::{SearchQuery, SearchResult, Track, UNKNOWN_ARTIST};

use super::cover_art::CoverArtProber;
use super::musicbrainz::{MbRecording, MusicBrainzClient};
use crate::error::Result;

/// Combines catalog matches and cover art into a page of [`Track`]s.
pub struct SearchAggregator {
    musicbrainz: Arc<MusicBrainzClient>,
    covers: Arc<CoverArtProber>,
}

impl SearchAggregator {
    pub fn new(musicbrainz: Arc<MusicBrainzClient>, covers: Arc<CoverArtProber>) -> Self {
        Self {
            musicbrainz,
            covers,
        }
    }

    pub fn new_shared(musicbrainz: Arc<MusicBrainzClient>, covers: Arc<CoverArtProber>) -> Arc<Self> {
        Arc::new(Self::new(musicbrainz, covers))
    }

    /// Run a search.
    ///
    /// Queries without terms are rejected before any upstream call. Covers are
    /// probed concurrently; the returned tracks keep the catalog's order.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        query.validate()?;

        let page = self.musicbrainz.search_recordings(query).await?;
        let limit = query.limit() as usize;

        let tracks: Vec<Track> = stream::iter(page.recordings.into_iter().take(limit))
            .map(|recording| self.to_track(recording))
            .buffered(limit.max(1))
            .collect()
            .await;

        tracing::debug!(
            artist = ?query.artist,
            title = ?query.title,
            offset = query.offset,
            results = tracks.len(),
            total = page.count,
            "Track search"
        );

        Ok(SearchResult {
            tracks,
            total: page.count,
        })
    }

    async fn to_track(&self, recording: MbRecording) -> Track {
        let image = self.covers.resolve(recording.primary_release_id()).await;
        let artist = recording
            .artist_names()
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Track {
            id: recording.id,
            name: recording.title,
            artist,
            image,
        }
    }
}
