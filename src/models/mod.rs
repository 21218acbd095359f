//! Data models for seeds, songs and recommendation features.

pub mod common;
pub mod parameter;
pub mod seed;
pub mod song;

// Re-exports for convenience
pub use common::Image;
pub use parameter::{Feature, ParameterRange};
pub use seed::{Seed, SeedKind};
pub use song::Song;
