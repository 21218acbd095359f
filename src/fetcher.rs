//! Recommendation fetching.
//!
//! A [`FetchRequest`] is a snapshot of the committed seeds and parameters
//! tagged with a generation number. The session issues requests and applies
//! only the response whose generation is the latest one it issued, so a slow
//! response to an older request can never overwrite a newer result.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::RecommendationGenerator;
use crate::error::Result;
use crate::models::Song;
use crate::parameters::ParameterStore;
use crate::seeds::SeedSet;

/// One scheduled recommendation fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Monotonically increasing per session.
    pub generation: u64,
    pub seeds: SeedSet,
    pub parameters: ParameterStore,
    pub limit: u32,
}

/// Invokes the recommendation generator for a [`FetchRequest`].
///
/// Cheap to clone, so callers can run several fetches at once without
/// borrowing the session.
#[derive(Clone)]
pub struct RecommendationFetcher {
    generator: Arc<dyn RecommendationGenerator>,
    token: String,
}

impl std::fmt::Debug for RecommendationFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationFetcher").finish_non_exhaustive()
    }
}

impl RecommendationFetcher {
    pub fn new<S: Into<String>>(generator: Arc<dyn RecommendationGenerator>, token: S) -> Self {
        Self {
            generator,
            token: token.into(),
        }
    }

    pub async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Song>> {
        debug!(
            "Fetching recommendations (generation {}, {} seeds, limit {})",
            request.generation,
            request.seeds.len(),
            request.limit
        );

        let result = self
            .generator
            .get_recommendations(
                &self.token,
                &request.parameters,
                &request.seeds,
                request.limit,
            )
            .await;

        match &result {
            Ok(songs) => debug!(
                "Generation {} returned {} songs",
                request.generation,
                songs.len()
            ),
            Err(e) => warn!("Generation {} failed: {}", request.generation, e),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemixrError;
    use crate::models::{ParameterRange, Seed};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the arguments of every call.
    #[derive(Default)]
    struct RecordingGenerator {
        calls: Mutex<Vec<(String, ParameterStore, usize, u32)>>,
        fail: bool,
    }

    #[async_trait]
    impl RecommendationGenerator for RecordingGenerator {
        async fn get_recommendations(
            &self,
            token: &str,
            parameters: &ParameterStore,
            seeds: &SeedSet,
            limit: u32,
        ) -> Result<Vec<Song>> {
            self.calls
                .lock()
                .unwrap()
                .push((token.to_string(), *parameters, seeds.len(), limit));
            if self.fail {
                return Err(RemixrError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(vec![Song::new("s1", "spotify:track:s1", "Song")])
        }
    }

    fn request() -> FetchRequest {
        let mut parameters = ParameterStore::default();
        parameters.set_energy(ParameterRange::new(0.4, 0.6));
        FetchRequest {
            generation: 1,
            seeds: SeedSet::single(Seed::artist("a1", "One")),
            parameters,
            limit: 25,
        }
    }

    #[tokio::test]
    async fn test_fetch_passes_snapshot() {
        let generator = Arc::new(RecordingGenerator::default());
        let fetcher = RecommendationFetcher::new(generator.clone(), "token");

        let songs = fetcher.fetch(&request()).await.unwrap();
        assert_eq!(songs.len(), 1);

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (token, parameters, seed_count, limit) = &calls[0];
        assert_eq!(token, "token");
        assert_eq!(parameters.energy, ParameterRange::new(0.4, 0.6));
        assert_eq!(*seed_count, 1);
        assert_eq!(*limit, 25);
    }

    #[tokio::test]
    async fn test_fetch_propagates_failure() {
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let fetcher = RecommendationFetcher::new(generator, "token");
        assert!(matches!(
            fetcher.fetch(&request()).await,
            Err(RemixrError::Api { status: 503, .. })
        ));
    }
}
