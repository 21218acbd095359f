//! # remixr
//!
//! Session core for seed-driven music recommendations.
//!
//! A session starts from either a set of seed artists/tracks or a stored
//! playlist, refetches recommendations whenever seeds or parameters change,
//! and saves the current songs as a shareable playlist.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use remixr::api::{BackendApi, SpotifyApi};
//! use remixr::{
//!     ApiConfig, Message, Seed, SeedSet, SessionConfig, SessionController, SessionEntry,
//!     SessionServices,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_config = ApiConfig::new("http://localhost:8888");
//!     let spotify = Arc::new(SpotifyApi::new(&api_config)?);
//!     let services = SessionServices {
//!         backend: Arc::new(BackendApi::new(&api_config)?),
//!         catalog: spotify.clone(),
//!         generator: spotify,
//!         access_token: "spotify_access_token".to_string(),
//!     };
//!
//!     let seeds = SeedSet::single(Seed::artist("0OdUWJ0sBjDrqHygGUXeCF", "Band of Horses"));
//!     let mut session =
//!         SessionController::start(SessionEntry::Seeds(seeds), services, SessionConfig::default())
//!             .await;
//!
//!     session.dispatch(Message::Refresh).await?;
//!     session
//!         .dispatch(Message::AddSeed(Seed::track("3n3Ppam7vgaVa1iaRUc9Lp", "Mr. Brightside")))
//!         .await?;
//!
//!     let link = session.save().await?;
//!     println!("Saved {} songs: {}", session.songs().len(), link);
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! - [`SessionController`] - owns all state and the load/refetch/save lifecycle
//! - [`SeedSet`] and [`ParameterStore`] - the inputs to recommendations
//! - [`RecommendationFetcher`] and [`PlaylistSaver`] - the two outgoing actions
//! - [`api`] - port traits and their HTTP clients

pub mod api;
pub mod config;
pub mod converters;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parameters;
pub mod saver;
pub mod seeds;
pub mod session;

pub use config::{ApiConfig, SessionConfig};
pub use error::{RemixrError, SeedError, SessionError};
pub use fetcher::{FetchRequest, RecommendationFetcher};
pub use models::{Feature, ParameterRange, Seed, SeedKind, Song};
pub use parameters::ParameterStore;
pub use saver::PlaylistSaver;
pub use seeds::{SeedSet, MAX_SEEDS, MIN_SEEDS};
pub use session::{
    Command, Message, Notice, PlaylistRef, SessionController, SessionEntry, SessionServices,
    SessionState,
};
