//! # weapon-decks
//!
//! Weapon-deck simulation engine for a cooperative board game companion.
//!
//! ## Design Principles
//!
//! 1. **One Shape, Three Decks**: Deck categories are a partition key over
//!    a single card shape and a single deck state type.
//!
//! 2. **Identity Over Content**: Every physical copy has its own id, so a
//!    specific Axe can be discarded or returned while its twins stay put.
//!
//! 3. **No Failure Modes**: Drawing from nothing or returning a card that
//!    isn't there is a no-op, not an error.
//!
//! 4. **Deterministic**: All randomness comes from seeded ChaCha streams.
//!
//! ## Modules
//!
//! - `core`: RNG and configuration
//! - `cards`: Templates, instances, template pool
//! - `deck`: Weighting, deck state, collection, snapshots

pub mod core;
pub mod cards;
pub mod deck;

// Re-export commonly used types
pub use crate::core::{ConfigError, DeckConfig, DeckRng, DeckRngState};

pub use crate::cards::{
    CardInstance, CardTemplate, DeckCategory, Difficulty, InstanceId, TemplatePool, WeaponKind,
};

pub use crate::deck::{
    CardRecord, CollectionSnapshot, DeckCollection, DeckHandle, DeckSnapshot, DeckState, ShuffleOutcome,
    SnapshotError,
};
