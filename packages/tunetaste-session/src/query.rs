//! Search query model and validation.

use thiserror::Error;

use crate::PAGE_LIMIT;

/// Errors raised when a query cannot be sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("missing search terms")]
    MissingSearchTerms,
}

/// Artist/title search with an offset into the result set.
///
/// Blank terms are stored as `None`. The page size is fixed at [`PAGE_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub offset: u32,
}

impl SearchQuery {
    pub fn new(artist: Option<&str>, title: Option<&str>, offset: u32) -> Self {
        Self {
            artist: non_blank(artist),
            title: non_blank(title),
            offset,
        }
    }

    /// Page size of every query.
    pub fn limit(&self) -> u32 {
        PAGE_LIMIT
    }

    /// Whether at least one of artist or title is present.
    pub fn has_terms(&self) -> bool {
        self.artist.is_some() || self.title.is_some()
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.has_terms() {
            Ok(())
        } else {
            Err(QueryError::MissingSearchTerms)
        }
    }

    /// Same terms, different offset.
    pub fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }
}

/// Parse a raw `offset` parameter, falling back to 0 when it is absent,
/// malformed or negative.
pub fn parse_offset(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
