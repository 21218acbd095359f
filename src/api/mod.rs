//! External services the session talks to.
//!
//! The session depends only on the three port traits below:
//! - [`ResultsBackend`]: stored results and playlist saving
//! - [`Catalog`]: artist/track metadata used to resolve seeds
//! - [`RecommendationGenerator`]: the recommendation service
//!
//! [`BackendApi`] and [`SpotifyApi`] are the HTTP implementations.

pub mod backend;
pub mod spotify;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Seed, Song};
use crate::parameters::ParameterStore;
use crate::seeds::SeedSet;

pub use backend::BackendApi;
pub use spotify::SpotifyApi;

/// What the backend stored for a generated playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResults {
    pub songs: Vec<Song>,
    pub parameters: ParameterStore,
    pub seed_artists: Vec<String>,
    pub seed_tracks: Vec<String>,
}

#[async_trait]
pub trait ResultsBackend: Send + Sync {
    /// `GET /results/{playlist_id}`.
    async fn get_results(&self, playlist_id: &str) -> Result<StoredResults>;

    /// `POST /save`; returns the shareable link.
    async fn save_playlist(&self, name: &str, tracks: &[String]) -> Result<String>;
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolve artist ids into artist seeds, in request order.
    async fn get_artists(&self, token: &str, ids: &[String]) -> Result<Vec<Seed>>;

    /// Resolve track ids into track seeds, in request order.
    async fn get_tracks(&self, token: &str, ids: &[String]) -> Result<Vec<Seed>>;
}

#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    async fn get_recommendations(
        &self,
        token: &str,
        parameters: &ParameterStore,
        seeds: &SeedSet,
        limit: u32,
    ) -> Result<Vec<Song>>;
}
