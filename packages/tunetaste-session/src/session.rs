//! Search session: the state one user builds up while searching and picking
//! favorites, driven against a [`SearchBackend`].

use async_trait::async_trait;
use thiserror::Error;

use crate::client::{AnalysisResponse, ApiClient, ClientError};
use crate::favorites::{FavoritesError, FavoritesStore};
use crate::pagination::Pagination;
use crate::preference::PreferenceVector;
use crate::query::SearchQuery;
use crate::track::{SearchResult, Track};
use crate::FAVORITES_CAPACITY;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Backend(#[from] ClientError),

    #[error(transparent)]
    Favorites(#[from] FavoritesError),

    #[error("analysis needs exactly {required} favorites, have {count}")]
    NotReady { count: usize, required: usize },

    #[error("no page in that direction")]
    NoPage,

    #[error("no result at position {0}")]
    NoSuchResult(usize),

    #[error("analysis response carried no preference vector")]
    InvalidAnalysis,
}

/// Operations a session needs from the server.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, ClientError>;

    async fn analyze(&self, favorites: &[Track]) -> Result<AnalysisResponse, ClientError>;
}

#[async_trait]
impl SearchBackend for ApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, ClientError> {
        ApiClient::search(self, query).await
    }

    async fn analyze(&self, favorites: &[Track]) -> Result<AnalysisResponse, ClientError> {
        self.submit_favorites(favorites).await
    }
}

pub struct SearchSession<B> {
    backend: B,
    artist: Option<String>,
    title: Option<String>,
    results: Vec<Track>,
    pagination: Pagination,
    favorites: FavoritesStore,
    preference: Option<PreferenceVector>,
}

impl<B: SearchBackend> SearchSession<B> {
    /// Start an empty session.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            artist: None,
            title: None,
            results: Vec::new(),
            pagination: Pagination::default(),
            favorites: FavoritesStore::new(),
            preference: None,
        }
    }

    /// Apply new search terms.
    ///
    /// Runs a fresh search from the first page. When both terms are blank the
    /// results and pagination are cleared without contacting the backend.
    pub async fn set_terms(&mut self, artist: &str, title: &str) -> Result<(), SessionError> {
        let query = SearchQuery::new(Some(artist), Some(title), 0);
        self.artist = query.artist.clone();
        self.title = query.title.clone();

        if !query.has_terms() {
            self.results.clear();
            self.pagination.reset();
            return Ok(());
        }

        self.run(query).await
    }

    /// Search the current terms starting at `offset`.
    pub async fn go_to_offset(&mut self, offset: u32) -> Result<(), SessionError> {
        let query = SearchQuery::new(self.artist.as_deref(), self.title.as_deref(), offset);
        self.run(query).await
    }

    pub async fn next_page(&mut self) -> Result<(), SessionError> {
        if !self.pagination.has_next() {
            return Err(SessionError::NoPage);
        }
        self.go_to_offset(self.pagination.next_offset()).await
    }

    pub async fn previous_page(&mut self) -> Result<(), SessionError> {
        if !self.pagination.has_previous() {
            return Err(SessionError::NoPage);
        }
        self.go_to_offset(self.pagination.previous_offset()).await
    }

    /// Results and pagination change only when the search succeeds.
    async fn run(&mut self, query: SearchQuery) -> Result<(), SessionError> {
        let result = self.backend.search(&query).await?;

        tracing::debug!(
            offset = query.offset,
            results = result.tracks.len(),
            total = result.total,
            "Search page loaded"
        );

        self.results = result.tracks;
        self.pagination.update(result.total, query.offset);
        Ok(())
    }

    pub fn add_favorite(&mut self, track: Track) -> Result<(), SessionError> {
        self.favorites.add(track)?;
        Ok(())
    }

    /// Add the result at `index` of the current page to the favorites.
    pub fn add_result(&mut self, index: usize) -> Result<(), SessionError> {
        let track = self
            .results
            .get(index)
            .cloned()
            .ok_or(SessionError::NoSuchResult(index))?;
        self.add_favorite(track)
    }

    pub fn remove_favorite(&mut self, id: &str) -> bool {
        self.favorites.remove(id)
    }

    /// Whether the analyze action is offered.
    pub fn can_analyze(&self) -> bool {
        self.favorites.can_analyze()
    }

    /// Send the favorites for analysis and keep the returned preference vector.
    pub async fn analyze(&mut self) -> Result<&PreferenceVector, SessionError> {
        if !self.favorites.can_analyze() {
            return Err(SessionError::NotReady {
                count: self.favorites.len(),
                required: FAVORITES_CAPACITY,
            });
        }

        let response = self.backend.analyze(self.favorites.tracks()).await?;
        let vector = response
            .preference_vector()
            .ok_or(SessionError::InvalidAnalysis)?;

        Ok(self.preference.insert(vector))
    }

    pub fn results(&self) -> &[Track] {
        &self.results
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn preference_vector(&self) -> Option<&PreferenceVector> {
        self.preference.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
