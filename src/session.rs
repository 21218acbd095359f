//! The session controller.
//!
//! Owns every piece of session state: seeds, parameters, the current song
//! list, the playlist name and the last generated link. All mutations go
//! through [`SessionController::apply`], which commits the change and
//! returns at most one [`Command`] to run. Running a fetch command and
//! feeding its outcome back through [`SessionController::complete_fetch`]
//! closes the loop; [`SessionController::dispatch`] does both in sequence.
//!
//! State machine:
//!
//! ```text
//! Initializing ──raw seeds──────────────────────────▶ Ready ◀──▶ Refetching
//!      │                                                ▲
//!      └──playlist──▶ LoadingPlaylist ──loaded──────────┘
//!                           │
//!                           └──backend/catalog error──▶ Failed (terminal)
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::api::{Catalog, RecommendationGenerator, ResultsBackend, StoredResults};
use crate::config::SessionConfig;
use crate::error::{RemixrError, SeedError, SessionError};
use crate::fetcher::{FetchRequest, RecommendationFetcher};
use crate::models::{Feature, ParameterRange, Seed, SeedKind, Song};
use crate::parameters::ParameterStore;
use crate::saver::PlaylistSaver;
use crate::seeds::SeedSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    LoadingPlaylist,
    Ready,
    Refetching,
    Failed,
}

/// A previously generated playlist to resume from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: String,
    pub name: String,
}

/// How a session starts.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEntry {
    /// Seeds picked by the user; parameters start from the configured defaults.
    Seeds(SeedSet),
    /// A stored playlist; songs, parameters and seeds come from the backend.
    Playlist(PlaylistRef),
}

/// External collaborators of one session.
#[derive(Clone)]
pub struct SessionServices {
    pub backend: Arc<dyn ResultsBackend>,
    pub catalog: Arc<dyn Catalog>,
    pub generator: Arc<dyn RecommendationGenerator>,
    /// Bearer token for the catalog and the generator.
    pub access_token: String,
}

/// A user edit to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    AddSeed(Seed),
    RemoveSeed { kind: SeedKind, id: String },
    SetParameter(Feature, ParameterRange),
    /// Change the playlist name. Does not refetch.
    Rename(String),
    /// Refetch with the current seeds and parameters.
    Refresh,
}

/// Work the controller asks its caller to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch(FetchRequest),
}

/// User-facing notification queued by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Constraint(SeedError),
    RefetchFailed(String),
    SaveFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Constraint(e) => write!(f, "{}", e),
            Notice::RefetchFailed(e) => write!(f, "Could not update recommendations: {}", e),
            Notice::SaveFailed(e) => write!(f, "Could not save playlist: {}", e),
        }
    }
}

pub struct SessionController {
    state: SessionState,
    config: SessionConfig,
    playlist: Option<PlaylistRef>,
    name: String,
    seeds: Option<SeedSet>,
    parameters: ParameterStore,
    songs: Vec<Song>,
    generated_link: Option<String>,
    loading: bool,
    failure: Option<SessionError>,
    notices: Vec<Notice>,
    /// Generation of the most recently issued fetch.
    generation: u64,
    fetcher: RecommendationFetcher,
    saver: PlaylistSaver,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state)
            .field("name", &self.name)
            .field("seeds", &self.seeds)
            .field("songs", &self.songs.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Run the initial load and return the session in `Ready` or `Failed`.
    ///
    /// Raw-seed entry makes no network calls and starts with an empty song
    /// list. Playlist entry loads the stored results, then resolves the seed
    /// artists and tracks concurrently; any failure ends in `Failed`.
    pub async fn start(
        entry: SessionEntry,
        services: SessionServices,
        config: SessionConfig,
    ) -> Self {
        let mut session = Self {
            state: SessionState::Initializing,
            playlist: None,
            name: config.default_name.clone(),
            seeds: None,
            parameters: config.default_parameters,
            songs: Vec::new(),
            generated_link: None,
            loading: true,
            failure: None,
            notices: Vec::new(),
            generation: 0,
            fetcher: RecommendationFetcher::new(
                services.generator.clone(),
                services.access_token.clone(),
            ),
            saver: PlaylistSaver::new(services.backend.clone()),
            config,
        };

        match entry {
            SessionEntry::Seeds(seeds) => {
                info!("Starting session from {} seeds", seeds.len());
                session.seeds = Some(seeds);
                session.loading = false;
                session.transition(SessionState::Ready);
            }
            SessionEntry::Playlist(playlist) => {
                session.transition(SessionState::LoadingPlaylist);
                match load_playlist(&services, &playlist.id).await {
                    Ok((stored, seeds)) => {
                        info!(
                            "Loaded playlist {} ({} songs, {} seeds)",
                            playlist.id,
                            stored.songs.len(),
                            seeds.len()
                        );
                        session.name = session.config.playlist_name(&playlist.name);
                        session.songs = stored.songs;
                        session.parameters = stored.parameters;
                        session.seeds = Some(seeds);
                        session.loading = false;
                        session.transition(SessionState::Ready);
                    }
                    Err(e) => {
                        error!("Loading playlist {} failed: {}", playlist.id, e);
                        session.failure = Some(SessionError::InitialLoad(e));
                        session.loading = false;
                        session.transition(SessionState::Failed);
                    }
                }
                session.playlist = Some(playlist);
            }
        }

        session
    }

    /// Commit a user edit.
    ///
    /// Every committed seed or parameter change, and every `Refresh`,
    /// returns exactly one fetch command built from the state at commit
    /// time. Rejected edits leave state untouched and queue a notice.
    pub fn apply(&mut self, message: Message) -> Result<Option<Command>, SessionError> {
        match self.state {
            SessionState::Ready | SessionState::Refetching => {}
            SessionState::Failed => return Err(SessionError::Failed),
            state => return Err(SessionError::Busy(state)),
        }
        let seeds = self.seeds.as_mut().ok_or(SessionError::Failed)?;

        let outcome = match message {
            Message::AddSeed(seed) => {
                debug!("Adding {} seed {}", seed.kind, seed.id);
                seeds.add(seed)
            }
            Message::RemoveSeed { kind, id } => {
                debug!("Removing {} seed {}", kind, id);
                seeds.remove(kind, &id).map(|_| ())
            }
            Message::SetParameter(feature, range) => {
                debug!("Setting {} to {}", feature, range);
                self.parameters.set(feature, range);
                Ok(())
            }
            Message::Rename(name) => {
                self.name = name;
                return Ok(None);
            }
            Message::Refresh => Ok(()),
        };

        if let Err(e) = outcome {
            warn!("Rejected seed change: {}", e);
            self.notices.push(Notice::Constraint(e.clone()));
            return Err(e.into());
        }

        let snapshot = seeds.clone();
        Ok(Some(self.schedule_fetch(snapshot)))
    }

    /// Issue a new fetch generation for the committed state.
    fn schedule_fetch(&mut self, seeds: SeedSet) -> Command {
        self.generation += 1;
        self.loading = true;
        self.generated_link = None;
        self.transition(SessionState::Refetching);

        Command::Fetch(FetchRequest {
            generation: self.generation,
            seeds,
            parameters: self.parameters,
            limit: self.config.limit,
        })
    }

    /// Apply the outcome of a fetch.
    ///
    /// Only the latest issued generation is applied; older responses are
    /// discarded whatever order they arrive in. Loading is cleared on both
    /// success and failure, and a failure keeps the previous songs.
    /// Returns whether the outcome was applied.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: crate::error::Result<Vec<Song>>,
    ) -> bool {
        if self.state != SessionState::Refetching || generation != self.generation {
            debug!(
                "Discarding stale fetch generation {} (latest {})",
                generation, self.generation
            );
            return false;
        }

        match result {
            Ok(songs) => {
                debug!(
                    "Applying {} songs from generation {}",
                    songs.len(),
                    generation
                );
                self.songs = songs;
            }
            Err(e) => {
                warn!("Refetch failed, keeping previous songs: {}", e);
                self.notices.push(Notice::RefetchFailed(e.to_string()));
            }
        }

        self.loading = false;
        self.transition(SessionState::Ready);
        true
    }

    /// Run a command to completion.
    pub async fn run(&mut self, command: Command) {
        match command {
            Command::Fetch(request) => {
                let result = self.fetcher.fetch(&request).await;
                self.complete_fetch(request.generation, result);
            }
        }
    }

    /// Apply a message and run the command it produces.
    pub async fn dispatch(&mut self, message: Message) -> Result<(), SessionError> {
        if let Some(command) = self.apply(message)? {
            self.run(command).await;
        }
        Ok(())
    }

    /// Save the current songs as a playlist named after the session.
    ///
    /// On success the returned link is kept until the next refetch.
    /// On failure the previous link is left as it was and a notice is queued.
    /// An empty song list is rejected before reaching the backend.
    pub async fn save(&mut self) -> Result<String, SessionError> {
        match self.state {
            SessionState::Ready => {}
            SessionState::Failed => return Err(SessionError::Failed),
            state => return Err(SessionError::Busy(state)),
        }

        if self.songs.is_empty() {
            let err = SessionError::NothingToSave;
            warn!("Not saving '{}': {}", self.name, err);
            self.notices.push(Notice::SaveFailed(err.to_string()));
            return Err(err);
        }

        match self.saver.save(&self.name, &self.songs).await {
            Ok(link) => {
                self.generated_link = Some(link.clone());
                Ok(link)
            }
            Err(e) => {
                self.notices.push(Notice::SaveFailed(e.to_string()));
                Err(SessionError::Save(e))
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            info!("Session {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the session failed to load and must be restarted.
    pub fn has_error(&self) -> bool {
        self.state == SessionState::Failed
    }

    /// The initial-load error that put the session in `Failed`.
    pub fn failure(&self) -> Option<&SessionError> {
        self.failure.as_ref()
    }

    /// Current seeds; `None` only when the session failed to load.
    pub fn seeds(&self) -> Option<&SeedSet> {
        self.seeds.as_ref()
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn playlist(&self) -> Option<&PlaylistRef> {
        self.playlist.as_ref()
    }

    /// Link of the last saved playlist, cleared by any refetch.
    pub fn generated_link(&self) -> Option<&str> {
        self.generated_link.as_deref()
    }

    /// Generation of the most recently issued fetch (0 before the first).
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// A fetcher that can run commands without borrowing the session.
    pub fn fetcher(&self) -> RecommendationFetcher {
        self.fetcher.clone()
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Load stored results, then resolve seed metadata.
async fn load_playlist(
    services: &SessionServices,
    playlist_id: &str,
) -> crate::error::Result<(StoredResults, SeedSet)> {
    let stored = services.backend.get_results(playlist_id).await?;

    let (artists, tracks) = tokio::try_join!(
        services
            .catalog
            .get_artists(&services.access_token, &stored.seed_artists),
        services
            .catalog
            .get_tracks(&services.access_token, &stored.seed_tracks),
    )?;

    let seeds = SeedSet::new(artists, tracks).map_err(|e| {
        RemixrError::InvalidResponse(format!("stored seeds for {}: {}", playlist_id, e))
    })?;

    Ok((stored, seeds))
}
