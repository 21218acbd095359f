//! Materializes the current song list as a playlist.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::ResultsBackend;
use crate::error::Result;
use crate::models::Song;

/// Saves a named song list through the backend and returns its share link.
#[derive(Clone)]
pub struct PlaylistSaver {
    backend: Arc<dyn ResultsBackend>,
}

impl std::fmt::Debug for PlaylistSaver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistSaver").finish_non_exhaustive()
    }
}

impl PlaylistSaver {
    pub fn new(backend: Arc<dyn ResultsBackend>) -> Self {
        Self { backend }
    }

    /// Save `songs` under `name`, in order.
    pub async fn save(&self, name: &str, songs: &[Song]) -> Result<String> {
        let uris: Vec<String> = songs.iter().map(|song| song.uri.clone()).collect();
        info!("Saving '{}' with {} tracks", name, uris.len());

        self.backend
            .save_playlist(name, &uris)
            .await
            .inspect_err(|e| warn!("Saving '{}' failed: {}", name, e))
    }
}
