//! The bounded seed set.
//!
//! Holds the artists and tracks that steer recommendations. The total is
//! kept within `MIN_SEEDS..=MAX_SEEDS` at all times: constructors validate
//! it and mutations that would leave the range are rejected without
//! touching state.

use serde::Serialize;

use crate::error::SeedError;
use crate::models::{Seed, SeedKind};

/// Most seeds the generator accepts in one request.
pub const MAX_SEEDS: usize = 5;

/// At least one seed must always remain.
pub const MIN_SEEDS: usize = 1;

/// Two ordered sequences of seeds, unique by id within each sequence.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeedSet {
    artists: Vec<Seed>,
    tracks: Vec<Seed>,
}

impl SeedSet {
    /// Build a seed set from artist and track seeds.
    ///
    /// Each seed is filed under its own `kind`, so the two arguments only
    /// fix the ordering. Fails when the total is outside `1..=5` or an id
    /// repeats within a kind.
    pub fn new(artists: Vec<Seed>, tracks: Vec<Seed>) -> Result<Self, SeedError> {
        let count = artists.len() + tracks.len();
        if !(MIN_SEEDS..=MAX_SEEDS).contains(&count) {
            return Err(SeedError::OutOfBounds { count });
        }

        let mut set = Self {
            artists: Vec::with_capacity(MAX_SEEDS),
            tracks: Vec::with_capacity(MAX_SEEDS),
        };
        for seed in artists.into_iter().chain(tracks) {
            if set.contains(seed.kind, &seed.id) {
                return Err(SeedError::Duplicate {
                    kind: seed.kind,
                    id: seed.id,
                });
            }
            set.sequence_mut(seed.kind).push(seed);
        }

        Ok(set)
    }

    /// A seed set holding a single seed.
    pub fn single(seed: Seed) -> Self {
        let mut set = Self {
            artists: Vec::new(),
            tracks: Vec::new(),
        };
        set.sequence_mut(seed.kind).push(seed);
        set
    }

    /// Append a seed to the sequence of its kind.
    pub fn add(&mut self, seed: Seed) -> Result<(), SeedError> {
        if self.len() >= MAX_SEEDS {
            return Err(SeedError::Full { max: MAX_SEEDS });
        }
        if self.contains(seed.kind, &seed.id) {
            return Err(SeedError::Duplicate {
                kind: seed.kind,
                id: seed.id,
            });
        }

        self.sequence_mut(seed.kind).push(seed);
        Ok(())
    }

    /// Remove a seed by id from the sequence of `kind`, returning it.
    pub fn remove(&mut self, kind: SeedKind, id: &str) -> Result<Seed, SeedError> {
        if self.len() <= MIN_SEEDS {
            return Err(SeedError::LastSeed);
        }

        let sequence = self.sequence_mut(kind);
        let position = sequence
            .iter()
            .position(|seed| seed.id == id)
            .ok_or_else(|| SeedError::NotFound {
                kind,
                id: id.to_string(),
            })?;

        Ok(sequence.remove(position))
    }

    /// Total number of seeds.
    pub fn len(&self) -> usize {
        self.artists.len() + self.tracks.len()
    }

    /// Whether the set holds no seeds. False for every constructed set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether another seed can be added.
    pub fn is_full(&self) -> bool {
        self.len() >= MAX_SEEDS
    }

    pub fn contains(&self, kind: SeedKind, id: &str) -> bool {
        self.sequence(kind).iter().any(|seed| seed.id == id)
    }

    pub fn artists(&self) -> &[Seed] {
        &self.artists
    }

    pub fn tracks(&self) -> &[Seed] {
        &self.tracks
    }

    /// Artist ids in order.
    pub fn artist_ids(&self) -> Vec<&str> {
        self.artists.iter().map(|s| s.id.as_str()).collect()
    }

    /// Track ids in order.
    pub fn track_ids(&self) -> Vec<&str> {
        self.tracks.iter().map(|s| s.id.as_str()).collect()
    }

    /// Iterate over all seeds, artists first.
    pub fn iter(&self) -> impl Iterator<Item = &Seed> {
        self.artists.iter().chain(self.tracks.iter())
    }

    fn sequence(&self, kind: SeedKind) -> &Vec<Seed> {
        match kind {
            SeedKind::Artist => &self.artists,
            SeedKind::Track => &self.tracks,
        }
    }

    fn sequence_mut(&mut self, kind: SeedKind) -> &mut Vec<Seed> {
        match kind {
            SeedKind::Artist => &mut self.artists,
            SeedKind::Track => &mut self.tracks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(n: u32) -> Seed {
        Seed::artist(format!("a{}", n), format!("Artist {}", n))
    }

    fn track(n: u32) -> Seed {
        Seed::track(format!("t{}", n), format!("Track {}", n))
    }

    #[test]
    fn test_new_rejects_empty_and_oversized() {
        assert_eq!(
            SeedSet::new(vec![], vec![]),
            Err(SeedError::OutOfBounds { count: 0 })
        );
        let artists = (1..=4).map(artist).collect();
        let tracks = (1..=2).map(track).collect();
        assert_eq!(
            SeedSet::new(artists, tracks),
            Err(SeedError::OutOfBounds { count: 6 })
        );
    }

    #[test]
    fn test_new_files_seeds_by_kind() {
        let set = SeedSet::new(vec![artist(1), track(1)], vec![]).unwrap();
        assert_eq!(set.artist_ids(), vec!["a1"]);
        assert_eq!(set.track_ids(), vec!["t1"]);
        assert!(!set.is_empty());
        assert!(!SeedSet::single(track(2)).is_empty());
    }

    #[test]
    fn test_add_until_full() {
        let mut set = SeedSet::single(artist(1));
        set.add(track(1)).unwrap();
        for n in 2..=4 {
            set.add(artist(n)).unwrap();
        }
        assert_eq!(set.len(), MAX_SEEDS);
        assert!(set.is_full());

        let before = set.clone();
        assert_eq!(set.add(artist(6)), Err(SeedError::Full { max: 5 }));
        assert_eq!(set, before);
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut set = SeedSet::single(artist(1));
        assert_eq!(
            set.add(artist(1)),
            Err(SeedError::Duplicate {
                kind: SeedKind::Artist,
                id: "a1".to_string()
            })
        );
        // Same id under the other kind is a different seed.
        set.add(Seed::track("a1", "Track named like an artist"))
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_keeps_last_seed() {
        let mut set = SeedSet::new(vec![artist(1), artist(2)], vec![track(1)]).unwrap();
        let removed = set.remove(SeedKind::Artist, "a1").unwrap();
        assert_eq!(removed.id, "a1");
        set.remove(SeedKind::Track, "t1").unwrap();
        assert_eq!(set.len(), 1);

        assert_eq!(set.remove(SeedKind::Artist, "a2"), Err(SeedError::LastSeed));
        assert_eq!(set.artist_ids(), vec!["a2"]);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut set = SeedSet::new(vec![artist(1)], vec![track(1)]).unwrap();
        assert!(matches!(
            set.remove(SeedKind::Artist, "t1"),
            Err(SeedError::NotFound { .. })
        ));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_iter_order() {
        let set = SeedSet::new(vec![artist(1)], vec![track(1), track(2)]).unwrap();
        let ids: Vec<_> = set.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "t1", "t2"]);
    }
}
