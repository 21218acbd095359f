//! Tunable recommendation features and their ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `{min, max}` constraint on one feature.
///
/// Bounds come from the backend or the user and are stored as given:
/// no clamping and no `min <= max` check.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for ParameterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl std::str::FromStr for ParameterRange {
    type Err = String;

    /// Parse `min:max`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (min, max) = s
            .split_once(':')
            .ok_or_else(|| format!("expected min:max, got '{}'", s))?;
        let min = min
            .trim()
            .parse()
            .map_err(|_| format!("invalid minimum '{}'", min))?;
        let max = max
            .trim()
            .parse()
            .map_err(|_| format!("invalid maximum '{}'", max))?;
        Ok(Self { min, max })
    }
}

/// The six recommendation features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Popularity,
    Danceability,
    Energy,
    Acousticness,
    Valence,
    Tempo,
}

impl Feature {
    /// All features, in display order.
    pub const ALL: [Feature; 6] = [
        Feature::Popularity,
        Feature::Danceability,
        Feature::Energy,
        Feature::Acousticness,
        Feature::Valence,
        Feature::Tempo,
    ];

    /// Field suffix used in `min_<name>` / `max_<name>` keys.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Popularity => "popularity",
            Feature::Danceability => "danceability",
            Feature::Energy => "energy",
            Feature::Acousticness => "acousticness",
            Feature::Valence => "valence",
            Feature::Tempo => "tempo",
        }
    }

    pub fn min_key(&self) -> String {
        format!("min_{}", self.name())
    }

    pub fn max_key(&self) -> String {
        format!("max_{}", self.name())
    }

    /// Default range for sessions that start from raw seeds.
    pub fn default_range(&self) -> ParameterRange {
        match self {
            Feature::Popularity => ParameterRange::new(0.0, 100.0),
            Feature::Tempo => ParameterRange::new(50.0, 200.0),
            _ => ParameterRange::new(0.0, 1.0),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown feature '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let range: ParameterRange = "60:180".parse().unwrap();
        assert_eq!(range, ParameterRange::new(60.0, 180.0));
        assert!("60".parse::<ParameterRange>().is_err());
        assert!("a:1".parse::<ParameterRange>().is_err());
    }

    #[test]
    fn test_inverted_range_is_kept() {
        let range: ParameterRange = "0.9:0.1".parse().unwrap();
        assert_eq!(range.min, 0.9);
        assert_eq!(range.max, 0.1);
    }

    #[test]
    fn test_feature_keys() {
        assert_eq!(Feature::Tempo.min_key(), "min_tempo");
        assert_eq!(Feature::Acousticness.max_key(), "max_acousticness");
        assert_eq!("Energy".parse::<Feature>(), Ok(Feature::Energy));
    }

    #[test]
    fn test_default_ranges() {
        assert_eq!(
            Feature::Popularity.default_range(),
            ParameterRange::new(0.0, 100.0)
        );
        assert_eq!(Feature::Valence.default_range(), ParameterRange::new(0.0, 1.0));
        assert_eq!(Feature::Tempo.default_range(), ParameterRange::new(50.0, 200.0));
    }
}
