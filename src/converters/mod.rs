//! JSON to model converters.
//!
//! Turns raw backend and catalog responses into typed models. Catalog ids
//! may arrive as strings or numbers and optional display fields may be
//! missing, so the helpers here are lenient about everything except the
//! identifying fields.

use serde_json::Value;

use crate::api::StoredResults;
use crate::error::{RemixrError, Result};
use crate::models::{Feature, Image, ParameterRange, Seed, SeedKind, Song};
use crate::parameters::ParameterStore;

/// Get string from JSON, returning empty string if not found.
fn get_str(json: &Value, key: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Get an optional string from JSON.
fn get_opt_str(json: &Value, key: &str) -> Option<String> {
    json.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Get string ID from JSON (handles both string and numeric IDs).
fn get_id(json: &Value, key: &str) -> Option<String> {
    json.get(key).and_then(value_to_id)
}

fn value_to_id(v: &Value) -> Option<String> {
    if let Some(s) = v.as_str() {
        Some(s.to_string())
    } else if let Some(n) = v.as_u64() {
        Some(n.to_string())
    } else {
        v.as_i64().map(|n| n.to_string())
    }
}

/// Get u32 from JSON, saturating values that do not fit.
fn get_u32(json: &Value, key: &str) -> u32 {
    u32::try_from(get_u64(json, key)).unwrap_or(u32::MAX)
}

/// Get u64 from JSON.
fn get_u64(json: &Value, key: &str) -> u64 {
    json.get(key).and_then(|v| v.as_u64()).unwrap_or(0)
}

/// Get a required number from JSON.
fn get_f64(json: &Value, key: &str) -> Result<f64> {
    json.get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| RemixrError::MissingField(key.to_string()))
}

/// Extract images from a catalog `images` array.
pub fn extract_images(json: &Value) -> Vec<Image> {
    json.get("images")
        .and_then(|i| i.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|img| {
                    let url = img.get("url").and_then(|u| u.as_str())?;
                    Some(Image::new(
                        url,
                        get_u32(img, "height"),
                        get_u32(img, "width"),
                    ))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn largest_image_url(json: &Value) -> Option<String> {
    Image::largest(&extract_images(json)).map(|img| img.url.clone())
}

/// Map a catalog artist object into an artist seed.
pub fn parse_artist_seed(json: &Value) -> Result<Seed> {
    let id = get_id(json, "id").ok_or_else(|| RemixrError::MissingField("artist id".into()))?;

    Ok(Seed {
        kind: SeedKind::Artist,
        id,
        name: get_str(json, "name"),
        image: largest_image_url(json),
    })
}

/// Map a catalog track object into a track seed.
///
/// Tracks carry no images of their own; the album cover is used.
pub fn parse_track_seed(json: &Value) -> Result<Seed> {
    let id = get_id(json, "id").ok_or_else(|| RemixrError::MissingField("track id".into()))?;

    Ok(Seed {
        kind: SeedKind::Track,
        id,
        name: get_str(json, "name"),
        image: json.get("album").and_then(largest_image_url),
    })
}

/// Parse a catalog response of the form `{"<key>": [...]}` into seeds.
///
/// The catalog answers `null` for unknown ids; those entries are skipped.
pub fn parse_seed_list(json: &Value, kind: SeedKind) -> Result<Vec<Seed>> {
    let key = match kind {
        SeedKind::Artist => "artists",
        SeedKind::Track => "tracks",
    };
    let items = json
        .get(key)
        .and_then(|a| a.as_array())
        .ok_or_else(|| RemixrError::MissingField(key.to_string()))?;

    items
        .iter()
        .filter(|item| !item.is_null())
        .map(|item| match kind {
            SeedKind::Artist => parse_artist_seed(item),
            SeedKind::Track => parse_track_seed(item),
        })
        .collect()
}

/// Parse a song.
///
/// Accepts both full catalog track objects (artists and album as objects)
/// and the flattened shape stored by the backend (plain strings).
pub fn parse_song(json: &Value) -> Result<Song> {
    let id = get_id(json, "id").ok_or_else(|| RemixrError::MissingField("song id".into()))?;
    let uri = get_opt_str(json, "uri")
        .ok_or_else(|| RemixrError::MissingField(format!("uri of song {}", id)))?;

    let artists = json
        .get("artists")
        .and_then(|a| a.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|artist| match artist {
                    Value::String(name) => Some(name.clone()),
                    other => get_opt_str(other, "name"),
                })
                .collect()
        })
        .unwrap_or_default();

    let (album, image) = match json.get("album") {
        Some(Value::String(name)) => (Some(name.clone()), get_opt_str(json, "image")),
        Some(album) if album.is_object() => (
            get_opt_str(album, "name"),
            largest_image_url(album).or_else(|| get_opt_str(json, "image")),
        ),
        _ => (None, get_opt_str(json, "image")),
    };

    Ok(Song {
        id,
        uri,
        name: get_str(json, "name"),
        artists,
        album,
        image,
        duration_ms: get_u64(json, "duration_ms"),
        popularity: json
            .get("popularity")
            .and_then(|p| p.as_u64())
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX)),
        preview_url: get_opt_str(json, "preview_url"),
    })
}

/// Parse an array of songs.
pub fn parse_songs(json: &Value) -> Result<Vec<Song>> {
    json.as_array()
        .ok_or_else(|| RemixrError::InvalidResponse("expected an array of songs".into()))?
        .iter()
        .map(parse_song)
        .collect()
}

/// Read the six `min_<feature>` / `max_<feature>` pairs.
pub fn parse_parameters(json: &Value) -> Result<ParameterStore> {
    let mut store = ParameterStore::default();
    for feature in Feature::ALL {
        let min = get_f64(json, &feature.min_key())?;
        let max = get_f64(json, &feature.max_key())?;
        store.set(feature, ParameterRange::new(min, max));
    }
    Ok(store)
}

/// Read a list of ids; a missing or null list is empty.
fn parse_id_list(json: &Value, key: &str) -> Vec<String> {
    json.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(value_to_id).collect())
        .unwrap_or_default()
}

/// Parse the backend's `GET /results/{id}` payload.
pub fn parse_stored_results(json: &Value) -> Result<StoredResults> {
    let songs = parse_songs(
        json.get("songs")
            .ok_or_else(|| RemixrError::MissingField("songs".into()))?,
    )?;
    let parameters_json = json
        .get("parameters")
        .ok_or_else(|| RemixrError::MissingField("parameters".into()))?;

    Ok(StoredResults {
        songs,
        parameters: parse_parameters(parameters_json)?,
        seed_artists: parse_id_list(parameters_json, "seed_artists"),
        seed_tracks: parse_id_list(parameters_json, "seed_tracks"),
    })
}

/// Parse the backend's `POST /save` payload.
pub fn parse_save_link(json: &Value) -> Result<String> {
    get_opt_str(json, "link")
        .filter(|link| !link.is_empty())
        .ok_or_else(|| RemixrError::MissingField("link".into()))
}
