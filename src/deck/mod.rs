//! Deck simulation: weighting, per-category deck state, and the collection.
//!
//! ## Key Types
//!
//! - `DeckState`: One physical deck (draw pile, discard pile, history)
//! - `DeckCollection`: The three decks at a shared difficulty
//! - `DeckSnapshot` / `CollectionSnapshot`: Hand-off format for persistence

pub mod collection;
pub mod snapshot;
pub mod state;
pub mod weighting;

pub use collection::{DeckCollection, DeckHandle};
pub use snapshot::{CardRecord, CollectionSnapshot, DeckSnapshot, SnapshotError};
pub use state::{DeckState, ShuffleOutcome};
pub use weighting::{effective_count, multiplier};
