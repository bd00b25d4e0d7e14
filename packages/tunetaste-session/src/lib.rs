//! Tunetaste session library.
//!
//! Holds the track model shared by the server and its clients, plus the
//! session-side state of a search: the favorites list, pagination, debounced
//! input and the rendered preference vector.

pub mod client;
pub mod debounce;
pub mod favorites;
pub mod pagination;
pub mod preference;
pub mod query;
pub mod session;
pub mod track;

pub use client::{AnalysisResponse, ApiClient, ClientError};
pub use debounce::Debouncer;
pub use favorites::{FavoritesError, FavoritesStore};
pub use pagination::Pagination;
pub use preference::{PreferenceVector, Slider};
pub use query::{QueryError, SearchQuery};
pub use session::{SearchBackend, SearchSession, SessionError};
pub use track::{SearchResult, Track};

/// Number of tracks returned per search page.
pub const PAGE_LIMIT: u32 = 10;

/// Exact number of favorites required before an analysis can be requested.
pub const FAVORITES_CAPACITY: usize = 10;

/// Image reference used when no cover art could be found.
pub const DEFAULT_COVER_IMAGE: &str = "/default-cover.jpg";

/// Artist name used when a recording carries no artist credit.
pub const UNKNOWN_ARTIST: &str = "Unknown";
