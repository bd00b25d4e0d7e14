//! MusicBrainz catalog client.
//!
//! Runs paginated recording searches against the MusicBrainz web service.
//! Includes rate limiting to comply with MusicBrainz's 1 request/second limit.

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tunetaste_session::SearchQuery;

use crate::config::MusicBrainzConfig;
use crate::error::{AppError, Result};

/// Characters with meaning in the Lucene query syntax.
const LUCENE_SPECIAL: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
    '/',
];

// =============================================================================
// Rate Limiter
// =============================================================================

/// Rate limiter to enforce MusicBrainz's 1 request per second limit.
struct RateLimiter {
    last_request: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            // Start in the past so the first request can proceed immediately
            last_request: Mutex::new(now.checked_sub(min_interval).unwrap_or(now)),
            min_interval,
        }
    }

    /// Wait until the rate limit allows another request.
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.min_interval {
            tokio::time::sleep(self.min_interval - elapsed).await;
        }
        *last = Instant::now();
    }
}

// =============================================================================
// MusicBrainz Client
// =============================================================================

/// One page of recording matches.
#[derive(Debug)]
pub struct RecordingPage {
    /// Matches in relevance order
    pub recordings: Vec<MbRecording>,
    /// Total number of matches across all pages
    pub count: u32,
}

/// MusicBrainz API client for recording searches.
pub struct MusicBrainzClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl MusicBrainzClient {
    /// Create a new MusicBrainz client.
    ///
    /// MusicBrainz requires a proper User-Agent header with application name,
    /// version, and contact information.
    ///
    /// # Errors
    /// Returns an error if the app name or contact is empty, or if the rate
    /// limit is too high (max 60000ms).
    pub fn new(config: &MusicBrainzConfig) -> Result<Self> {
        if config.app_name.trim().is_empty() {
            return Err(AppError::Internal(
                "MusicBrainz app name cannot be empty".to_string(),
            ));
        }

        if config.contact.trim().is_empty() {
            return Err(AppError::Internal(
                "MusicBrainz contact information cannot be empty".to_string(),
            ));
        }

        if config.rate_limit_ms < 1000 {
            tracing::warn!(
                "Rate limit {}ms is below MusicBrainz minimum of 1000ms, this may result in rate limiting",
                config.rate_limit_ms
            );
        }

        // Reasonable upper bound to catch configuration errors
        if config.rate_limit_ms > 60_000 {
            return Err(AppError::Internal(format!(
                "Rate limit {}ms is unreasonably high (max 60000ms)",
                config.rate_limit_ms
            )));
        }

        let user_agent = format!(
            "{}/{} ({})",
            config.app_name,
            env!("CARGO_PKG_VERSION"),
            config.contact
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(Duration::from_millis(config.rate_limit_ms)),
        })
    }

    /// Create a new MusicBrainz client wrapped in Arc for shared access.
    pub fn new_shared(config: &MusicBrainzConfig) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Search recordings matching the query's artist and/or title.
    ///
    /// Returns at most `query.limit()` matches starting at `query.offset`.
    pub async fn search_recordings(&self, query: &SearchQuery) -> Result<RecordingPage> {
        let expression = build_query(query)?;
        tracing::debug!(query = %expression, offset = query.offset, "Searching MusicBrainz recordings");

        let params = [
            ("query", expression),
            ("fmt", "json".to_string()),
            ("limit", query.limit().to_string()),
            ("offset", query.offset.to_string()),
        ];

        let response: MbSearchResponse = self.get_with_params("/recording", &params).await?;

        Ok(RecordingPage {
            recordings: response.recordings,
            count: response.count.unwrap_or(0),
        })
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Perform a rate-limited GET and deserialize the JSON response.
    async fn get_with_params<T, P>(&self, path: &str, params: &[P]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
        P: serde::Serialize,
    {
        self.rate_limiter.wait().await;

        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                AppError::SearchFailed(format!("MusicBrainz request to {} failed: {}", path, e))
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::SearchFailed(
                "MusicBrainz rate limit exceeded".to_string(),
            ));
        }

        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(AppError::SearchFailed(
                "MusicBrainz service temporarily unavailable".to_string(),
            ));
        }

        if !status.is_success() {
            return Err(AppError::SearchFailed(format!(
                "MusicBrainz API {} returned error status: {}",
                path, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::SearchFailed(format!(
                "Failed to parse MusicBrainz response from {}: {}",
                path, e
            ))
        })
    }
}

/// Build the Lucene filter expression for a query.
///
/// Artist and title clauses are joined with `AND` only when both are present.
pub fn build_query(query: &SearchQuery) -> Result<String> {
    let clauses: Vec<String> = [
        query.artist.as_deref().map(|a| format!("artist:({})", escape_lucene(a))),
        query.title.as_deref().map(|t| format!("recording:({})", escape_lucene(t))),
    ]
    .into_iter()
    .flatten()
    .collect();

    if clauses.is_empty() {
        return Err(AppError::MissingSearchTerms);
    }

    Ok(clauses.join(" AND "))
}

fn escape_lucene(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if LUCENE_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// =============================================================================
// Response Types
// =============================================================================

/// Recording search response from the MusicBrainz API.
#[derive(Debug, Deserialize)]
pub struct MbSearchResponse {
    #[serde(default)]
    pub recordings: Vec<MbRecording>,
    /// Total number of matches
    pub count: Option<u32>,
}

/// Recording (unique performance).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MbRecording {
    /// MusicBrainz ID (UUID)
    pub id: String,
    /// Recording title
    pub title: String,
    /// Artist credits for this recording
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    /// Releases this recording appears on
    #[serde(default)]
    pub releases: Vec<MbReleaseRef>,
}

impl MbRecording {
    /// Credited artist names joined with ", ", or `None` without credits.
    pub fn artist_names(&self) -> Option<String> {
        let names: Vec<&str> = self
            .artist_credit
            .iter()
            .map(ArtistCredit::credited_name)
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }

    /// The first release listed for the recording.
    pub fn primary_release_id(&self) -> Option<&str> {
        self.releases.first().map(|r| r.id.as_str())
    }
}

/// Artist credit for a recording.
#[derive(Debug, Deserialize)]
pub struct ArtistCredit {
    /// Name as credited on this recording
    #[serde(default)]
    pub name: String,
    pub artist: Option<MbArtistRef>,
}

impl ArtistCredit {
    fn credited_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        self.artist.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }
}

/// Artist named by a credit.
#[derive(Debug, Deserialize)]
pub struct MbArtistRef {
    pub name: String,
}

/// Minimal release reference.
#[derive(Debug, Deserialize)]
pub struct MbReleaseRef {
    /// MusicBrainz ID (UUID)
    pub id: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MusicBrainzConfig {
        MusicBrainzConfig {
            contact: "test@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_app_name_rejected() {
        let config = MusicBrainzConfig {
            app_name: "   ".to_string(),
            ..test_config()
        };
        assert!(MusicBrainzClient::new(&config).is_err());
    }

    #[test]
    fn test_empty_contact_rejected() {
        let config = MusicBrainzConfig {
            contact: String::new(),
            ..test_config()
        };
        assert!(MusicBrainzClient::new(&config).is_err());
    }

    #[test]
    fn test_excessive_rate_limit_rejected() {
        let config = MusicBrainzConfig {
            rate_limit_ms: 100_000,
            ..test_config()
        };
        assert!(MusicBrainzClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_rate_limiter() {
        let limiter = RateLimiter::new(Duration::from_millis(100));

        let start = Instant::now();

        // First request should be immediate
        limiter.wait().await;
        let first_elapsed = start.elapsed();
        assert!(first_elapsed < Duration::from_millis(50));

        // Second request should wait
        limiter.wait().await;
        let second_elapsed = start.elapsed();
        assert!(second_elapsed >= Duration::from_millis(100));
    }

    #[test]
    fn test_build_query_artist_only() {
        let query = SearchQuery::new(Some("Miles Davis"), None, 0);
        assert_eq!(build_query(&query).unwrap(), "artist:(Miles Davis)");
    }

    #[test]
    fn test_build_query_both_terms() {
        let query = SearchQuery::new(Some("Miles Davis"), Some("So What"), 0);
        assert_eq!(
            build_query(&query).unwrap(),
            "artist:(Miles Davis) AND recording:(So What)"
        );
    }

    #[test]
    fn test_build_query_title_only() {
        let query = SearchQuery::new(None, Some("Blue in Green"), 0);
        assert_eq!(build_query(&query).unwrap(), "recording:(Blue in Green)");
    }

    #[test]
    fn test_build_query_escapes_special_characters() {
        let query = SearchQuery::new(Some("AC/DC"), Some("What? (live)"), 0);
        assert_eq!(
            build_query(&query).unwrap(),
            r"artist:(AC\/DC) AND recording:(What\? \(live\))"
        );
    }

    #[test]
    fn test_build_query_without_terms() {
        let query = SearchQuery::new(None, None, 0);
        assert!(matches!(build_query(&query), Err(AppError::MissingSearchTerms)));
    }

    #[test]
    fn test_deserialize_recording_search_response() {
        let json = r#"{
            "created": "2024-01-01T00:00:00.000Z",
            "count": 2,
            "offset": 0,
            "recordings": [
                {
                    "id": "a1",
                    "score": 100,
                    "title": "So What",
                    "artist-credit": [
                        { "name": "Miles Davis", "artist": { "id": "m1", "name": "Miles Davis", "sort-name": "Davis, Miles" } }
                    ],
                    "releases": [ { "id": "r1", "title": "Kind of Blue" }, { "id": "r2" } ]
                },
                {
                    "id": "a2",
                    "title": "Untitled"
                }
            ]
        }"#;

        let response: MbSearchResponse = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(response.count, Some(2));
        assert_eq!(response.recordings.len(), 2);

        let first = &response.recordings[0];
        assert_eq!(first.artist_names().as_deref(), Some("Miles Davis"));
        assert_eq!(first.primary_release_id(), Some("r1"));

        let second = &response.recordings[1];
        assert!(second.artist_names().is_none());
        assert!(second.primary_release_id().is_none());
    }

    #[test]
    fn test_artist_names_joined_with_comma() {
        let json = r#"{
            "id": "a1",
            "title": "Tutu",
            "artist-credit": [
                { "name": "Miles Davis", "joinphrase": " & " },
                { "name": "", "artist": { "id": "x", "name": "Marcus Miller" } }
            ]
        }"#;

        let recording: MbRecording = serde_json::from_str(json).unwrap();
        assert_eq!(
            recording.artist_names().as_deref(),
            Some("Miles Davis, Marcus Miller")
        );
    }

    #[test]
    fn test_deserialize_empty_response() {
        let response: MbSearchResponse = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(response.recordings.is_empty());
    }
}
