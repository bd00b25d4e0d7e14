//! HTTP client for the Tunetaste server API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::preference::PreferenceVector;
use crate::query::SearchQuery;
use crate::track::{SearchResult, Track};

const REQUEST_TIMEOUT_SECS: u64 = 90;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally, no request was sent.
    #[error("missing search terms")]
    MissingSearchTerms,

    /// The server answered with an error body.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Successful `POST /favorites` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    /// Analysis service payload, passed through untouched by the server
    pub analysis: Value,
}

impl AnalysisResponse {
    pub fn preference_vector(&self) -> Option<PreferenceVector> {
        PreferenceVector::from_analysis(&self.analysis)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for `GET /search` and `POST /favorites`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, ClientError> {
        query
            .validate()
            .map_err(|_| ClientError::MissingSearchTerms)?;

        let params = [
            ("artist", query.artist.clone().unwrap_or_default()),
            ("title", query.title.clone().unwrap_or_default()),
            ("offset", query.offset.to_string()),
        ];

        tracing::debug!(?query, "Searching tracks");

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&params)
            .send()
            .await?;

        Self::parse(response).await
    }

    pub async fn submit_favorites(&self, tracks: &[Track]) -> Result<AnalysisResponse, ClientError> {
        tracing::debug!(count = tracks.len(), "Submitting favorites for analysis");

        let response = self
            .client
            .post(format!("{}/favorites", self.base_url))
            .json(tracks)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn parse<T>(response: reqwest::Response) -> Result<T, ClientError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        if status == StatusCode::BAD_REQUEST && message == "missing search terms" {
            return Err(ClientError::MissingSearchTerms);
        }

        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
