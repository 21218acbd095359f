//! Seed models.
//!
//! A seed is an artist or track that steers the recommendation generator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which sequence of the seed set a seed belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    Artist,
    Track,
}

impl SeedKind {
    /// Lowercase label, as used on the wire and in the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedKind::Artist => "artist",
            SeedKind::Track => "track",
        }
    }
}

impl fmt::Display for SeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeedKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "artist" => Ok(SeedKind::Artist),
            "track" => Ok(SeedKind::Track),
            other => Err(format!("unknown seed kind '{}'", other)),
        }
    }
}

/// An artist or track seed.
///
/// Identity is `(kind, id)`; name and image are display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub kind: SeedKind,

    /// Catalog ID.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Image URL, when the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Seed {
    /// Create an artist seed.
    pub fn artist<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            kind: SeedKind::Artist,
            id: id.into(),
            name: name.into(),
            image: None,
        }
    }

    /// Create a track seed.
    pub fn track<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            kind: SeedKind::Track,
            id: id.into(),
            name: name.into(),
            image: None,
        }
    }

    /// Attach an image URL.
    pub fn with_image<S: Into<String>>(mut self, url: S) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Whether this seed has the given identity.
    pub fn is(&self, kind: SeedKind, id: &str) -> bool {
        self.kind == kind && self.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_identity() {
        let seed = Seed::artist("a1", "Artist One");
        assert!(seed.is(SeedKind::Artist, "a1"));
        assert!(!seed.is(SeedKind::Track, "a1"));
    }

    #[test]
    fn test_seed_kind_parse() {
        assert_eq!("Track".parse::<SeedKind>(), Ok(SeedKind::Track));
        assert!("album".parse::<SeedKind>().is_err());
    }

    #[test]
    fn test_seed_kind_serde() {
        let json = serde_json::to_string(&SeedKind::Artist).unwrap();
        assert_eq!(json, "\"artist\"");
    }
}
