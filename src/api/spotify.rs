//! Spotify Web API client.
//!
//! Serves as both the catalog (seed metadata) and the recommendation
//! generator. Every call is authorized with the caller's bearer token;
//! this client never stores or refreshes tokens.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use super::{Catalog, RecommendationGenerator};
use crate::config::ApiConfig;
use crate::converters;
use crate::error::{RemixrError, Result};
use crate::models::{Seed, SeedKind, Song};
use crate::parameters::ParameterStore;
use crate::seeds::SeedSet;

#[derive(Debug, Clone)]
pub struct SpotifyApi {
    client: Client,
    base_url: String,
}

impl SpotifyApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RemixrError::Config(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.spotify_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make an authorized GET request with query parameters.
    async fn get_api(
        &self,
        token: &str,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} with params: {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        decode_response(status, &text)
    }

    async fn get_seeds(&self, token: &str, kind: SeedKind, ids: &[String]) -> Result<Vec<Seed>> {
        // The catalog rejects an empty id list.
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = match kind {
            SeedKind::Artist => "artists",
            SeedKind::Track => "tracks",
        };
        let params = [("ids".to_string(), ids.join(","))];
        let data = self.get_api(token, endpoint, &params).await?;
        converters::parse_seed_list(&data, kind)
    }
}

/// Turn a catalog response into JSON, mapping error statuses and `error`
/// payloads to `Api` errors. Error bodies need not be JSON.
fn decode_response(status: StatusCode, text: &str) -> Result<Value> {
    let parsed = serde_json::from_str::<Value>(text);

    let error_message = parsed.as_ref().ok().and_then(|data| {
        data.get("error").map(|error| {
            error
                .get("message")
                .and_then(|m| m.as_str())
                .or_else(|| error.as_str())
                .unwrap_or("Unknown error")
                .to_string()
        })
    });

    if !status.is_success() || error_message.is_some() {
        let message = error_message.unwrap_or_else(|| text.chars().take(200).collect());
        error!("Spotify API error ({}): {}", status, message);
        return Err(RemixrError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(parsed?)
}

/// Build the `/recommendations` query for the given seeds and parameters.
pub fn recommendation_query(
    parameters: &ParameterStore,
    seeds: &SeedSet,
    limit: u32,
) -> Vec<(String, String)> {
    let mut params = vec![("limit".to_string(), limit.to_string())];

    if !seeds.artists().is_empty() {
        params.push(("seed_artists".to_string(), seeds.artist_ids().join(",")));
    }
    if !seeds.tracks().is_empty() {
        params.push(("seed_tracks".to_string(), seeds.track_ids().join(",")));
    }

    params.extend(parameters.to_query());
    params
}

#[async_trait]
impl Catalog for SpotifyApi {
    async fn get_artists(&self, token: &str, ids: &[String]) -> Result<Vec<Seed>> {
        self.get_seeds(token, SeedKind::Artist, ids).await
    }

    async fn get_tracks(&self, token: &str, ids: &[String]) -> Result<Vec<Seed>> {
        self.get_seeds(token, SeedKind::Track, ids).await
    }
}

#[async_trait]
impl RecommendationGenerator for SpotifyApi {
    async fn get_recommendations(
        &self,
        token: &str,
        parameters: &ParameterStore,
        seeds: &SeedSet,
        limit: u32,
    ) -> Result<Vec<Song>> {
        let params = recommendation_query(parameters, seeds, limit);
        let data = self.get_api(token, "recommendations", &params).await?;

        let tracks = data
            .get("tracks")
            .ok_or_else(|| RemixrError::MissingField("tracks".to_string()))?;
        converters::parse_songs(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParameterRange;

    #[test]
    fn test_recommendation_query() {
        let seeds = SeedSet::new(
            vec![Seed::artist("a1", "One"), Seed::artist("a2", "Two")],
            vec![Seed::track("t1", "Track")],
        )
        .unwrap();
        let mut parameters = ParameterStore::default();
        parameters.set_tempo(ParameterRange::new(60.0, 180.0));

        let query = recommendation_query(&parameters, &seeds, 100);
        let get = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("limit"), Some("100"));
        assert_eq!(get("seed_artists"), Some("a1,a2"));
        assert_eq!(get("seed_tracks"), Some("t1"));
        assert_eq!(get("min_tempo"), Some("60"));
        assert_eq!(get("max_popularity"), Some("100"));
    }

    #[test]
    fn test_query_omits_empty_seed_kind() {
        let seeds = SeedSet::single(Seed::track("t1", "Track"));
        let query = recommendation_query(&ParameterStore::default(), &seeds, 10);
        assert!(query.iter().all(|(k, _)| k != "seed_artists"));
    }

    #[test]
    fn test_error_status_with_html_body() {
        let err = decode_response(
            StatusCode::TOO_MANY_REQUESTS,
            "<html><body>Too Many Requests</body></html>",
        )
        .unwrap_err();
        match err {
            RemixrError::Api { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("Too Many Requests"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_status_without_error_key() {
        let err = decode_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"tracks": []}"#)
            .unwrap_err();
        assert!(matches!(err, RemixrError::Api { status: 500, .. }));
    }

    #[test]
    fn test_error_payload_message() {
        let body = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
        match decode_response(StatusCode::UNAUTHORIZED, body).unwrap_err() {
            RemixrError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "The access token expired");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_body_is_decoded() {
        let data = decode_response(StatusCode::OK, r#"{"tracks": []}"#).unwrap();
        assert!(data["tracks"].as_array().unwrap().is_empty());

        assert!(matches!(
            decode_response(StatusCode::OK, "not json"),
            Err(RemixrError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_ids_skip_request() {
        let api = SpotifyApi::new(&ApiConfig::new("http://localhost:8888")).unwrap();
        let seeds = tokio_test::block_on(api.get_artists("token", &[])).unwrap();
        assert!(seeds.is_empty());
    }
}
