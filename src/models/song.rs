//! Recommended song model.

use serde::{Deserialize, Serialize};

/// A song in the candidate list.
///
/// Only `id`, `uri` and `name` are guaranteed; the rest is display metadata
/// that the backend or generator may omit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Song {
    /// Catalog ID.
    pub id: String,

    /// Catalog URI, used when saving a playlist.
    pub uri: String,

    /// Song title.
    pub name: String,

    /// Artist names in credit order.
    #[serde(default)]
    pub artists: Vec<String>,

    /// Album title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,

    /// Catalog popularity (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,

    /// 30 second preview URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Song {
    /// Create a song with its identifying fields only.
    pub fn new<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        id: S1,
        uri: S2,
        name: S3,
    ) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get artist names as a single string.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists.join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artists_string() {
        let mut song = Song::new("1", "spotify:track:1", "Song");
        song.artists = vec!["A".to_string(), "B".to_string()];
        assert_eq!(song.artists_string(", "), "A, B");
    }
}
