//! Core engine plumbing: deterministic RNG and configuration.
//!
//! Nothing in here knows about cards. The deck types in `deck` are built
//! on top of these.

pub mod config;
pub mod rng;

pub use config::{ConfigError, DeckConfig, DEFAULT_RECENT_DRAWS, DEFAULT_SHUFFLE_ATTEMPTS};
pub use rng::{DeckRng, DeckRngState};
