//! Client for the remixr backend.
//!
//! The backend keeps generated playlists and their parameters, and creates
//! playlists on the user's account. It authenticates through a session
//! cookie, so the client carries a cookie jar.

use async_trait::async_trait;
use reqwest::{cookie::Jar, Client, Url};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{ResultsBackend, StoredResults};
use crate::config::ApiConfig;
use crate::converters;
use crate::error::{RemixrError, Result};

/// HTTP client for `GET /results/{id}` and `POST /save`.
///
/// # Example
///
/// ```rust,no_run
/// use remixr::api::{BackendApi, ResultsBackend};
/// use remixr::ApiConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = BackendApi::new(&ApiConfig::new("http://localhost:8888"))?;
///     let results = backend.get_results("37i9dQZF1DX0XUsuxWHRQd").await?;
///     println!("{} stored songs", results.songs.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BackendApi {
    client: Client,
    base_url: Url,
}

impl BackendApi {
    /// Create a backend client, seeding the cookie jar with the configured
    /// session cookie.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.backend_url)?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session_cookie {
            jar.add_cookie_str(cookie, &base_url);
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .cookie_provider(jar)
            .build()
            .map_err(|e| RemixrError::Config(format!("Failed to create client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| RemixrError::Config(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// `results/{id}` with the id encoded as one path segment, so ids
    /// carrying `/`, `?` or `#` cannot reach other endpoints.
    fn results_url(&self, playlist_id: &str) -> Result<Url> {
        if matches!(playlist_id, "" | "." | "..") {
            return Err(RemixrError::InvalidId(playlist_id.to_string()));
        }

        let mut url = self.endpoint("results/")?;
        url.path_segments_mut()
            .map_err(|_| RemixrError::Config("Backend URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(playlist_id);
        Ok(url)
    }

    /// Read a response body as JSON, turning error statuses into `Api` errors.
    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let preview: String = text.chars().take(200).collect();
            error!("Backend returned {}: {}", status, preview);
            return Err(RemixrError::Api {
                status: status.as_u16(),
                message: preview,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Parse a base URL, making sure relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
        .parse::<Url>()
        .map_err(|e| RemixrError::Config(format!("Invalid backend URL {}: {}", raw, e)))
}

#[async_trait]
impl ResultsBackend for BackendApi {
    async fn get_results(&self, playlist_id: &str) -> Result<StoredResults> {
        let url = self.results_url(playlist_id)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let data = Self::read_json(response).await?;
        converters::parse_stored_results(&data)
    }

    async fn save_playlist(&self, name: &str, tracks: &[String]) -> Result<String> {
        let url = self.endpoint("save")?;
        debug!("POST {} ({} tracks)", url, tracks.len());

        let body = json!({
            "name": name,
            "tracks": tracks,
        });
        let response = self.client.post(url).json(&body).send().await?;
        let data = Self::read_json(response).await?;
        let link = converters::parse_save_link(&data)?;

        info!("Saved playlist '{}': {}", name, link);
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path() {
        let base = parse_base_url("http://localhost:8888/api").unwrap();
        assert_eq!(
            base.join("results/p1").unwrap().as_str(),
            "http://localhost:8888/api/results/p1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(RemixrError::Config(_))
        ));
    }

    fn api_at(base: &str) -> BackendApi {
        BackendApi::new(&ApiConfig::new(base)).unwrap()
    }

    #[test]
    fn test_results_url() {
        let api = api_at("http://localhost:8888/api");
        assert_eq!(
            api.results_url("37i9dQZF1DX0XUsuxWHRQd").unwrap().as_str(),
            "http://localhost:8888/api/results/37i9dQZF1DX0XUsuxWHRQd"
        );
    }

    #[test]
    fn test_results_url_keeps_id_in_one_segment() {
        let api = api_at("http://localhost:8888/api");
        let url = api.results_url("../save?x=1#f").unwrap();

        assert!(url.path().starts_with("/api/results/"));
        assert_eq!(url.path_segments().unwrap().count(), 3);
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let nested = api.results_url("a/b").unwrap();
        assert_eq!(nested.path(), "/api/results/a%2Fb");
    }

    #[test]
    fn test_results_url_rejects_dot_ids() {
        let api = api_at("http://localhost:8888");
        for id in ["", ".", ".."] {
            assert!(matches!(
                api.results_url(id),
                Err(RemixrError::InvalidId(_))
            ));
        }
    }

    #[test]
    fn test_new_with_cookie() {
        let mut config = ApiConfig::new("http://localhost:8888");
        config.session_cookie = Some("session=abc".to_string());
        let api = BackendApi::new(&config).unwrap();
        assert_eq!(api.endpoint("save").unwrap().path(), "/save");
    }
}
