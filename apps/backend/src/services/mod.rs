//! Upstream clients and the search/relay services built on them.

pub mod analysis;
pub mod cover_art;
pub mod musicbrainz;
pub mod search;

pub use analysis::AnalysisRelay;
pub use cover_art::CoverArtProber;
pub use musicbrainz::MusicBrainzClient;
pub use search::SearchAggregator;
