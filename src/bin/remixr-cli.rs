use clap::{Parser, Subcommand};
use remixr::api::{BackendApi, Catalog, SpotifyApi};
use remixr::config::{DEFAULT_LIMIT, DEFAULT_SPOTIFY_API_URL};
use remixr::{
    ApiConfig, Feature, Message, ParameterRange, Seed, SeedKind, SeedSet, SessionConfig,
    SessionController, SessionEntry, SessionError, SessionServices,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "remixr-cli")]
#[command(about = "CLI for remixr - tune recommendations and save them as a playlist", long_about = None)]
struct Cli {
    /// remixr backend URL (can also be set via REMIXR_API_URL env var)
    #[arg(long, env = "REMIXR_API_URL")]
    api_url: String,

    /// Catalog and recommendation API URL
    #[arg(long, env = "SPOTIFY_API_URL", default_value = DEFAULT_SPOTIFY_API_URL)]
    spotify_url: String,

    /// Spotify access token (can also be set via SPOTIFY_ACCESS_TOKEN env var)
    #[arg(long, env = "SPOTIFY_ACCESS_TOKEN")]
    token: String,

    /// Backend session cookie as name=value
    #[arg(long, env = "REMIXR_SESSION_COOKIE")]
    cookie: Option<String>,

    /// Number of songs to request
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,

    /// Seed to add, as artist:ID or track:ID (repeatable)
    #[arg(long, value_name = "KIND:ID")]
    add: Vec<SeedArg>,

    /// Seed to remove, as artist:ID or track:ID (repeatable)
    #[arg(long, value_name = "KIND:ID")]
    remove: Vec<SeedArg>,

    /// Parameter range, e.g. tempo=60:180 (repeatable)
    #[arg(long, value_name = "FEATURE=MIN:MAX")]
    set: Vec<ParameterArg>,

    /// Playlist name to save under
    #[arg(short, long)]
    name: Option<String>,

    /// Save the final songs as a playlist
    #[arg(long)]
    save: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resume from a previously generated playlist
    Playlist {
        /// Playlist ID known to the backend
        id: String,

        /// Title of the source playlist
        #[arg(short, long, default_value = "playlist")]
        title: String,
    },
    /// Start from seed artists and tracks
    Seed {
        /// Artist ID (repeatable)
        #[arg(long = "artist")]
        artists: Vec<String>,

        /// Track ID (repeatable)
        #[arg(long = "track")]
        tracks: Vec<String>,
    },
}

#[derive(Clone)]
struct SeedArg {
    kind: SeedKind,
    id: String,
}

impl FromStr for SeedArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected kind:id, got '{}'", s))?;
        Ok(Self {
            kind: kind.parse()?,
            id: id.to_string(),
        })
    }
}

#[derive(Clone)]
struct ParameterArg {
    feature: Feature,
    range: ParameterRange,
}

impl FromStr for ParameterArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (feature, range) = s
            .split_once('=')
            .ok_or_else(|| format!("expected feature=min:max, got '{}'", s))?;
        Ok(Self {
            feature: feature.parse()?,
            range: range.parse()?,
        })
    }
}

/// Look up display metadata for one seed.
async fn resolve_seed(
    catalog: &SpotifyApi,
    token: &str,
    arg: &SeedArg,
) -> Result<Seed, Box<dyn std::error::Error>> {
    let ids = [arg.id.clone()];
    let found = match arg.kind {
        SeedKind::Artist => catalog.get_artists(token, &ids).await?,
        SeedKind::Track => catalog.get_tracks(token, &ids).await?,
    };
    found
        .into_iter()
        .next()
        .ok_or_else(|| format!("{} {} not found", arg.kind, arg.id).into())
}

/// Dispatch a seed edit; rejected edits are reported through the notice queue.
async fn apply_edit(
    session: &mut SessionController,
    message: Message,
) -> Result<(), SessionError> {
    match session.dispatch(message).await {
        Ok(()) | Err(SessionError::Constraint(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

fn print_session(session: &SessionController) {
    println!("\n🎛  {}", session.name());

    if let Some(seeds) = session.seeds() {
        println!("   Seeds:");
        for seed in seeds.iter() {
            println!("   - {} {} (ID: {})", seed.kind, seed.name, seed.id);
        }
    }

    println!("   Parameters:");
    for (feature, range) in session.parameters().iter() {
        println!("   - {:<13} {}", feature, range);
    }

    println!("   Songs:");
    for (i, song) in session.songs().iter().enumerate() {
        println!(
            "{:>4}. {} - {} ({})",
            i + 1,
            song.artists_string(", "),
            song.name,
            song.uri
        );
    }
}

fn print_notices(session: &mut SessionController) {
    for notice in session.take_notices() {
        eprintln!("⚠️  {}", notice);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("remixr=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut api_config = ApiConfig::new(&cli.api_url);
    api_config.spotify_api_url = cli.spotify_url.clone();
    api_config.session_cookie = cli.cookie.clone();

    let spotify = Arc::new(SpotifyApi::new(&api_config)?);
    let services = SessionServices {
        backend: Arc::new(BackendApi::new(&api_config)?),
        catalog: spotify.clone(),
        generator: spotify.clone(),
        access_token: cli.token.clone(),
    };
    let config = SessionConfig {
        limit: cli.limit,
        ..Default::default()
    };

    let entry = match &cli.command {
        Commands::Playlist { id, title } => SessionEntry::Playlist(remixr::PlaylistRef {
            id: id.clone(),
            name: title.clone(),
        }),
        Commands::Seed { artists, tracks } => {
            let (artists, tracks) = tokio::try_join!(
                spotify.get_artists(&cli.token, artists),
                spotify.get_tracks(&cli.token, tracks),
            )?;
            SessionEntry::Seeds(SeedSet::new(artists, tracks)?)
        }
    };

    let mut session = SessionController::start(entry, services, config).await;
    if let Some(failure) = session.failure() {
        eprintln!("❌ {}", failure);
        return Err(SessionError::Failed.into());
    }

    // Raw seeds start without songs.
    if session.songs().is_empty() {
        session.dispatch(Message::Refresh).await?;
    }

    for arg in &cli.remove {
        let message = Message::RemoveSeed {
            kind: arg.kind,
            id: arg.id.clone(),
        };
        apply_edit(&mut session, message).await?;
    }

    for arg in &cli.add {
        let seed = resolve_seed(&spotify, &cli.token, arg).await?;
        apply_edit(&mut session, Message::AddSeed(seed)).await?;
    }

    for arg in &cli.set {
        session
            .dispatch(Message::SetParameter(arg.feature, arg.range))
            .await?;
    }

    if let Some(name) = &cli.name {
        session.dispatch(Message::Rename(name.clone())).await?;
    }

    print_session(&session);
    print_notices(&mut session);

    if cli.save {
        match session.save().await {
            Ok(link) => println!("✅ Saved '{}': {}", session.name(), link),
            Err(e) => {
                print_notices(&mut session);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
