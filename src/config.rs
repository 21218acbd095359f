//! Session and client configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RemixrError, Result};
use crate::parameters::ParameterStore;

/// Default catalog and recommendation endpoint.
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Default number of songs requested per fetch.
pub const DEFAULT_LIMIT: u32 = 100;

/// Per-session settings, passed to the session at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Parameters used when a session starts from raw seeds.
    pub default_parameters: ParameterStore,

    /// Songs requested from the generator per fetch.
    pub limit: u32,

    /// Playlist name for raw-seed sessions.
    pub default_name: String,

    /// Prefix for sessions derived from a playlist: `<prefix>:<playlist name>`.
    pub name_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_parameters: ParameterStore::default(),
            limit: DEFAULT_LIMIT,
            default_name: "remixr".to_string(),
            name_prefix: "remixr".to_string(),
        }
    }
}

impl SessionConfig {
    /// Name for a session derived from the playlist `playlist_name`.
    pub fn playlist_name(&self, playlist_name: &str) -> String {
        format!("{}:{}", self.name_prefix, playlist_name)
    }
}

/// Where the HTTP clients talk to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the remixr backend (serves `/results/{id}` and `/save`).
    pub backend_url: String,

    /// Base URL of the catalog and recommendation API.
    #[serde(default = "default_spotify_api_url")]
    pub spotify_api_url: String,

    /// Backend session cookie, as `name=value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_spotify_api_url() -> String {
    DEFAULT_SPOTIFY_API_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("remixr/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ApiConfig {
    pub fn new<S: Into<String>>(backend_url: S) -> Self {
        Self {
            backend_url: backend_url.into(),
            spotify_api_url: default_spotify_api_url(),
            session_cookie: None,
            user_agent: default_user_agent(),
        }
    }

    /// Load from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.backend_url.trim().is_empty() {
            return Err(RemixrError::Config("backend_url is empty".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParameterRange;

    #[test]
    fn test_session_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.limit, 100);
        assert_eq!(config.default_name, "remixr");
        assert_eq!(config.playlist_name("mix"), "remixr:mix");
        assert_eq!(
            config.default_parameters.tempo,
            ParameterRange::new(50.0, 200.0)
        );
    }

    #[test]
    fn test_session_config_partial_json() {
        let config: SessionConfig = serde_json::from_str(r#"{"limit": 20}"#).unwrap();
        assert_eq!(config.limit, 20);
        assert_eq!(config.name_prefix, "remixr");
    }

    #[test]
    fn test_api_config_from_json() {
        let config =
            ApiConfig::from_json(r#"{"backend_url": "http://localhost:8080"}"#).unwrap();
        assert_eq!(config.spotify_api_url, DEFAULT_SPOTIFY_API_URL);
        assert!(config.session_cookie.is_none());
        assert!(config.user_agent.starts_with("remixr/"));

        assert!(matches!(
            ApiConfig::from_json(r#"{"backend_url": " "}"#),
            Err(RemixrError::Config(_))
        ));
    }
}
