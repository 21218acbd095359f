//! The recommendation parameter store.
//!
//! Six independent `{min, max}` ranges. Setters replace a range as given;
//! there is no cross-feature invariant and no validation of the bounds.

use serde::{Deserialize, Serialize};

use crate::models::{Feature, ParameterRange};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParameterStore {
    pub popularity: ParameterRange,
    pub danceability: ParameterRange,
    pub energy: ParameterRange,
    pub acousticness: ParameterRange,
    pub valence: ParameterRange,
    pub tempo: ParameterRange,
}

impl Default for ParameterStore {
    /// Popularity `[0, 100]`, tempo `[50, 200]`, everything else `[0, 1]`.
    fn default() -> Self {
        Self {
            popularity: Feature::Popularity.default_range(),
            danceability: Feature::Danceability.default_range(),
            energy: Feature::Energy.default_range(),
            acousticness: Feature::Acousticness.default_range(),
            valence: Feature::Valence.default_range(),
            tempo: Feature::Tempo.default_range(),
        }
    }
}

impl ParameterStore {
    pub fn get(&self, feature: Feature) -> ParameterRange {
        match feature {
            Feature::Popularity => self.popularity,
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Acousticness => self.acousticness,
            Feature::Valence => self.valence,
            Feature::Tempo => self.tempo,
        }
    }

    /// Replace the range for `feature` unconditionally.
    pub fn set(&mut self, feature: Feature, range: ParameterRange) {
        *self.slot_mut(feature) = range;
    }

    pub fn set_popularity(&mut self, range: ParameterRange) {
        self.set(Feature::Popularity, range);
    }

    pub fn set_danceability(&mut self, range: ParameterRange) {
        self.set(Feature::Danceability, range);
    }

    pub fn set_energy(&mut self, range: ParameterRange) {
        self.set(Feature::Energy, range);
    }

    pub fn set_acousticness(&mut self, range: ParameterRange) {
        self.set(Feature::Acousticness, range);
    }

    pub fn set_valence(&mut self, range: ParameterRange) {
        self.set(Feature::Valence, range);
    }

    pub fn set_tempo(&mut self, range: ParameterRange) {
        self.set(Feature::Tempo, range);
    }

    /// Iterate over `(feature, range)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, ParameterRange)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Flatten into `min_<feature>` / `max_<feature>` query pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.iter()
            .flat_map(|(feature, range)| {
                [
                    (feature.min_key(), range.min.to_string()),
                    (feature.max_key(), range.max.to_string()),
                ]
            })
            .collect()
    }

    fn slot_mut(&mut self, feature: Feature) -> &mut ParameterRange {
        match feature {
            Feature::Popularity => &mut self.popularity,
            Feature::Danceability => &mut self.danceability,
            Feature::Energy => &mut self.energy,
            Feature::Acousticness => &mut self.acousticness,
            Feature::Valence => &mut self.valence,
            Feature::Tempo => &mut self.tempo,
        }
    }
}
