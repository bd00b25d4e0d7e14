//! Relay of a favorites list to the external analysis service.

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tunetaste_session::Track;

use crate::config::AnalysisConfig;
use crate::error::{AppError, Result};

/// Forwards favorites to the analysis service and hands back its response.
pub struct AnalysisRelay {
    client: Client,
    url: Option<String>,
}

impl AnalysisRelay {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone().filter(|u| !u.trim().is_empty()),
        })
    }

    pub fn new_shared(config: &AnalysisConfig) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(config)?))
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Send the favorites and return the service's JSON response untouched.
    ///
    /// The list size is not checked here.
    pub async fn analyze(&self, favorites: &[Track]) -> Result<Value> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::RelayFailed("analysis service URL not configured".to_string()))?;

        tracing::debug!(count = favorites.len(), "Relaying favorites to analysis service");

        let response = self
            .client
            .post(url)
            .json(favorites)
            .send()
            .await
            .map_err(|e| AppError::RelayFailed(format!("analysis request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RelayFailed(format!(
                "analysis service returned error status: {}",
                status
            )));
        }

        let analysis = response.json::<Value>().await.map_err(|e| {
            AppError::RelayFailed(format!("Failed to parse analysis response: {}", e))
        })?;

        tracing::debug!(preference_vector = %analysis, "Analysis received");
        Ok(analysis)
    }
}
