//! Engine configuration.
//!
//! Callers configure a `DeckCollection` at startup with a `DeckConfig`:
//! - RNG seed for reproducible sessions
//! - Shuffle retry cap for the no-adjacent-duplicate search
//! - Length of the recent-draws view
//! - Starting difficulty

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Difficulty;

/// Default cap on shuffle attempts when avoiding adjacent duplicates.
pub const DEFAULT_SHUFFLE_ATTEMPTS: u32 = 10;

/// Default number of entries in the recent-draws view.
pub const DEFAULT_RECENT_DRAWS: usize = 3;

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

/// Configuration shared by every deck in a collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Master seed. Each deck derives its own stream from it.
    pub seed: u64,

    /// Maximum full permutations tried per shuffle before accepting
    /// whatever order the last attempt produced.
    pub shuffle_attempts: u32,

    /// Number of history entries exposed by `recent_draws`.
    pub recent_draws: usize,

    /// Difficulty every deck starts at.
    pub initial_difficulty: Difficulty,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shuffle_attempts: DEFAULT_SHUFFLE_ATTEMPTS,
            recent_draws: DEFAULT_RECENT_DRAWS,
            initial_difficulty: Difficulty::Medium,
        }
    }
}

impl DeckConfig {
    /// Set the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the shuffle retry cap.
    #[must_use]
    pub fn with_shuffle_attempts(mut self, attempts: u32) -> Self {
        self.shuffle_attempts = attempts;
        self
    }

    /// Set the recent-draws view length.
    #[must_use]
    pub fn with_recent_draws(mut self, len: usize) -> Self {
        self.recent_draws = len;
        self
    }

    /// Set the starting difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.initial_difficulty = difficulty;
        self
    }

    /// Check configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shuffle_attempts == 0 {
            return Err(ConfigError::Zero {
                field: "shuffle_attempts",
            });
        }
        if self.recent_draws == 0 {
            return Err(ConfigError::Zero {
                field: "recent_draws",
            });
        }
        Ok(())
    }
}
