//! Test infrastructure for Tunetaste integration tests.
//!
//! Provides a `TestApp` wrapper around `axum_test::TestServer` whose upstream
//! services (catalog, cover art, analysis) are all served by one
//! `wiremock::MockServer`.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tunetaste::config::{AnalysisConfig, Config, CoverArtConfig, MusicBrainzConfig, ServerConfig};
use tunetaste::{api, AppState};

/// Path the analysis service is mounted at on the mock upstream.
pub const ANALYSIS_PATH: &str = "/recommend";

/// Test application wrapper around axum_test::TestServer.
pub struct TestApp {
    server: TestServer,
    upstream: MockServer,
}

impl TestApp {
    /// Create a test application with every upstream pointed at a mock server.
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Create a test application with no analysis service configured.
    pub async fn without_analysis() -> Self {
        Self::build(false).await
    }

    async fn build(with_analysis: bool) -> Self {
        let upstream = MockServer::start().await;

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            musicbrainz: MusicBrainzConfig {
                base_url: upstream.uri(),
                contact: "tests@example.com".to_string(),
                rate_limit_ms: 0,
                ..Default::default()
            },
            cover_art: CoverArtConfig {
                base_url: upstream.uri(),
                thumbnail_size: Some("250".to_string()),
                probe_timeout_ms: 500,
                default_image: "/default-cover.jpg".to_string(),
            },
            analysis: AnalysisConfig {
                url: with_analysis.then(|| format!("{}{}", upstream.uri(), ANALYSIS_PATH)),
                timeout_secs: 5,
            },
        };

        let state = AppState::from_config(&config).expect("Failed to build application state");
        let app = api::router(state);

        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, upstream }
    }

    /// Get a reference to the test server.
    pub fn server(&self) -> &TestServer {
        &self.server
    }

    /// Get a reference to the mock upstream.
    pub fn upstream(&self) -> &MockServer {
        &self.upstream
    }

    /// Cover URL the server reports for a release that has cover art.
    pub fn cover_url(&self, release_id: &str) -> String {
        format!("{}/release/{}/front-250", self.upstream.uri(), release_id)
    }

    /// Serve a catalog page with the given recordings and total count.
    pub async fn mock_recordings(&self, recordings: Vec<Value>, count: u32) {
        Mock::given(method("GET"))
            .and(path("/recording"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created": "2024-01-01T00:00:00.000Z",
                "count": count,
                "offset": 0,
                "recordings": recordings
            })))
            .mount(&self.upstream)
            .await;
    }

    /// Make the catalog answer every search with the given status.
    pub async fn mock_catalog_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/recording"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.upstream)
            .await;
    }

    /// Report cover art as present for a release, after an optional delay.
    pub async fn mock_cover(&self, release_id: &str, delay: Option<Duration>) {
        let mut template = ResponseTemplate::new(200);
        if let Some(delay) = delay {
            template = template.set_delay(delay);
        }

        Mock::given(method("HEAD"))
            .and(path(format!("/release/{}/front-250", release_id)))
            .respond_with(template)
            .mount(&self.upstream)
            .await;
    }

    /// Serve an analysis response.
    pub async fn mock_analysis(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(ANALYSIS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.upstream)
            .await;
    }

    /// Requests the mock upstream has received so far.
    pub async fn upstream_requests(&self) -> Vec<wiremock::Request> {
        self.upstream.received_requests().await.unwrap_or_default()
    }
}

/// A catalog recording as returned by the MusicBrainz search API.
pub fn recording(id: &str, title: &str, artists: &[&str], release: Option<&str>) -> Value {
    let credits: Vec<Value> = artists
        .iter()
        .map(|name| json!({ "name": name, "artist": { "id": format!("artist-{}", name), "name": name } }))
        .collect();

    let mut rec = json!({
        "id": id,
        "score": 100,
        "title": title,
        "artist-credit": credits
    });
    if let Some(release) = release {
        rec["releases"] = json!([{ "id": release, "title": "Some Release" }]);
    }
    rec
}

/// A favorites payload of `n` distinct tracks.
pub fn favorites_payload(n: usize) -> Value {
    let tracks: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": format!("rec-{}", i),
                "name": format!("Song {}", i),
                "artist": "Miles Davis",
                "image": "/default-cover.jpg"
            })
        })
        .collect();
    Value::Array(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_endpoint() {
        let app = TestApp::new().await;
        let response = app.server().get("/health").await;

        response.assert_status_ok();
        response.assert_json_contains(&serde_json::json!({
            "message": "Tunetaste is running"
        }));
    }
}
