//! Tunetaste server library.
//!
//! Search proxy over the MusicBrainz catalog with cover art lookup, and a
//! relay that sends a favorites list to the analysis service.
//! This library exposes modules for use in integration tests.

use axum::response::Json;
use serde::Serialize;
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod services;

use crate::config::Config;
use crate::error::Result;
use crate::services::{AnalysisRelay, CoverArtProber, MusicBrainzClient, SearchAggregator};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchAggregator>,
    pub relay: Arc<AnalysisRelay>,
}

impl AppState {
    /// Build every upstream client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let musicbrainz = MusicBrainzClient::new_shared(&config.musicbrainz)?;
        let covers = CoverArtProber::new_shared(&config.cover_art)?;
        let relay = AnalysisRelay::new_shared(&config.analysis)?;

        Ok(Self {
            search: SearchAggregator::new_shared(musicbrainz, covers),
            relay,
        })
    }

    /// Get a reference to the search aggregator.
    pub fn search(&self) -> &SearchAggregator {
        &self.search
    }

    /// Get a reference to the analysis relay.
    pub fn relay(&self) -> &AnalysisRelay {
        &self.relay
    }
}

#[derive(Serialize)]
pub struct ApiResponse {
    pub message: String,
    pub version: String,
}

pub async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse {
        message: "Tunetaste is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
