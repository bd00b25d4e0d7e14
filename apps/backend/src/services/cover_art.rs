//! Cover Art Archive existence probing.
//!
//! Cover art is cosmetic: every failure here resolves to the configured
//! default image and never reaches the caller.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CoverArtConfig;
use crate::error::{AppError, Result};

/// Checks whether a release has front cover art.
pub struct CoverArtProber {
    client: Client,
    base_url: String,
    thumbnail_size: Option<String>,
    probe_timeout: Duration,
    default_image: String,
}

impl CoverArtProber {
    pub fn new(config: &CoverArtConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            thumbnail_size: config.thumbnail_size.clone().filter(|s| !s.trim().is_empty()),
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
            default_image: config.default_image.clone(),
        })
    }

    pub fn new_shared(config: &CoverArtConfig) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Front cover URL for a release.
    pub fn cover_url(&self, release_mbid: &str) -> String {
        match &self.thumbnail_size {
            Some(size) => format!("{}/release/{}/front-{}", self.base_url, release_mbid, size),
            None => format!("{}/release/{}/front", self.base_url, release_mbid),
        }
    }

    /// Resolve the image for a recording's primary release.
    ///
    /// Returns the cover URL when it exists, the default image otherwise.
    pub async fn resolve(&self, release_mbid: Option<&str>) -> String {
        let Some(release_mbid) = release_mbid else {
            return self.default_image.clone();
        };

        match self.probe(release_mbid).await {
            Some(url) => url,
            None => self.default_image.clone(),
        }
    }

    /// Check the cover URL, giving up after the probe timeout.
    pub async fn probe(&self, release_mbid: &str) -> Option<String> {
        let url = self.cover_url(release_mbid);

        let outcome = tokio::time::timeout(self.probe_timeout, self.client.head(&url).send()).await;

        match outcome {
            Ok(Ok(response)) if response.status().is_success() => Some(url),
            Ok(Ok(response)) => {
                tracing::debug!(mbid = %release_mbid, status = %response.status(), "No cover art");
                None
            }
            Ok(Err(e)) => {
                tracing::debug!(mbid = %release_mbid, error = %e, "Cover art probe failed");
                None
            }
            Err(_) => {
                tracing::debug!(
                    mbid = %release_mbid,
                    timeout_ms = self.probe_timeout.as_millis() as u64,
                    "Cover art probe timed out"
                );
                None
            }
        }
    }
}
