//! Configuration module for the Tunetaste server.
//!
//! Loads configuration from `config.toml` with environment variable overrides.

use config::{Config as ConfigLoader, Environment, File, Map};
use serde::Deserialize;

use crate::error::AppError;

const PLACEHOLDER_CONTACT: &str = "your_email@example.com";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub musicbrainz: MusicBrainzConfig,
    #[serde(default)]
    pub cover_art: CoverArtConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// MusicBrainz catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MusicBrainzConfig {
    #[serde(default = "default_mb_base_url")]
    pub base_url: String,
    /// Application name sent in the User-Agent
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Contact email or URL sent in the User-Agent
    #[serde(default = "default_contact")]
    pub contact: String,
    #[serde(default = "default_rate_limit")]
    pub rate_limit_ms: u64,
    #[serde(default = "default_mb_timeout")]
    pub timeout_secs: u64,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: default_mb_base_url(),
            app_name: default_app_name(),
            contact: default_contact(),
            rate_limit_ms: default_rate_limit(),
            timeout_secs: default_mb_timeout(),
        }
    }
}

fn default_mb_base_url() -> String {
    "https://musicbrainz.org/ws/2".to_string()
}

fn default_app_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_contact() -> String {
    PLACEHOLDER_CONTACT.to_string()
}

fn default_rate_limit() -> u64 {
    1000 // MusicBrainz allows at most 1 request/second
}

fn default_mb_timeout() -> u64 {
    30
}

/// Cover Art Archive probing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CoverArtConfig {
    #[serde(default = "default_cover_base_url")]
    pub base_url: String,
    /// Thumbnail size ("250", "500", "1200"); unset links the full front image
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: Option<String>,
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
    /// Image used when a recording has no reachable cover
    #[serde(default = "default_image")]
    pub default_image: String,
}

impl Default for CoverArtConfig {
    fn default() -> Self {
        Self {
            base_url: default_cover_base_url(),
            thumbnail_size: default_thumbnail_size(),
            probe_timeout_ms: default_probe_timeout(),
            default_image: default_image(),
        }
    }
}

fn default_cover_base_url() -> String {
    "https://coverartarchive.org".to_string()
}

fn default_thumbnail_size() -> Option<String> {
    Some("250".to_string())
}

fn default_probe_timeout() -> u64 {
    3000
}

fn default_image() -> String {
    tunetaste_session::DEFAULT_COVER_IMAGE.to_string()
}

/// External analysis service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Endpoint that receives the favorites list
    pub url: Option<String>,
    #[serde(default = "default_analysis_timeout")]
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_analysis_timeout(),
        }
    }
}

fn default_analysis_timeout() -> u64 {
    60
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. `config.toml` in current directory (optional)
    /// 3. Environment variables with `TUNETASTE_` prefix
    ///
    /// Environment variables use double underscore for nesting:
    /// - `TUNETASTE_SERVER__PORT=9000` sets `server.port`
    /// - `TUNETASTE_ANALYSIS__URL=http://localhost:8000/recommend` sets `analysis.url`
    pub fn load() -> Result<Self, AppError> {
        Self::load_from("config.toml")
    }

    /// Load configuration from a specific file path.
    pub fn load_from(config_path: &str) -> Result<Self, AppError> {
        Self::load_with_env(config_path, None)
    }

    /// `env` replaces the process environment when set.
    fn load_with_env(
        config_path: &str,
        env: Option<Map<String, String>>,
    ) -> Result<Self, AppError> {
        let config = ConfigLoader::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", 3000)?
            .set_default("musicbrainz.base_url", default_mb_base_url())?
            .set_default("musicbrainz.app_name", default_app_name())?
            .set_default("musicbrainz.contact", default_contact())?
            .set_default("musicbrainz.rate_limit_ms", 1000)?
            .set_default("musicbrainz.timeout_secs", 30)?
            .set_default("cover_art.base_url", default_cover_base_url())?
            .set_default("cover_art.probe_timeout_ms", 3000)?
            .set_default("cover_art.default_image", default_image())?
            .set_default("analysis.timeout_secs", 60)?
            .add_source(File::with_name(config_path).required(false))
            // TUNETASTE_SERVER__PORT=9000 -> server.port = 9000
            .add_source(
                Environment::with_prefix("TUNETASTE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration, warning about settings that degrade behaviour.
    fn validate(&self) -> Result<(), AppError> {
        if self.musicbrainz.app_name.trim().is_empty() {
            return Err(AppError::Internal(
                "musicbrainz.app_name cannot be empty".to_string(),
            ));
        }

        if self.musicbrainz.contact.trim() == PLACEHOLDER_CONTACT {
            tracing::warn!(
                "MusicBrainz contact is the placeholder address - set TUNETASTE_MUSICBRAINZ__CONTACT"
            );
        }

        if self.analysis.url.is_none() {
            tracing::warn!("Analysis service URL not configured - POST /favorites will fail");
        }

        if self.cover_art.probe_timeout_ms == 0 {
            return Err(AppError::Internal(
                "cover_art.probe_timeout_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::{IpAddr, Ipv4Addr, SocketAddr};
        let ip: IpAddr = self.server.host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid host '{}', using 0.0.0.0", self.server.host);
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        });
        SocketAddr::new(ip, self.server.port)
    }
}
