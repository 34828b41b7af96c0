//! Snapshots for handing deck state to a persistence layer.
//!
//! Cards are recorded as `(InstanceId, template name)` pairs in pile order.
//! Restoring resolves names against a template pool, so a snapshot stays
//! valid as long as the pool still contains every recorded name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardInstance, DeckCategory, Difficulty, InstanceId, TemplatePool};
use crate::core::{ConfigError, DeckRngState};

/// Errors raised when encoding, decoding, or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("no {category} template named {name:?} in pool")]
    UnknownTemplate { category: DeckCategory, name: String },
    #[error("card {id} recorded in the {expected} deck")]
    CategoryMismatch { id: InstanceId, expected: DeckCategory },
    #[error("snapshot has no {0} deck")]
    MissingDeck(DeckCategory),
    #[error("card {0} recorded twice across the draw and discard piles")]
    DuplicateCard(InstanceId),
    #[error("card {id} is not below the next serial {next_serial}")]
    StaleSerial { id: InstanceId, next_serial: u32 },
    #[error("{category} deck recorded at {found} in a {expected} collection")]
    DifficultyMismatch {
        category: DeckCategory,
        expected: Difficulty,
        found: Difficulty,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One recorded card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: InstanceId,
    pub template: String,
}

impl From<&CardInstance> for CardRecord {
    fn from(card: &CardInstance) -> Self {
        Self {
            id: card.id,
            template: card.name().to_string(),
        }
    }
}

impl CardRecord {
    /// Turn the record back into a card using `pool`'s templates for `category`.
    pub fn resolve(
        &self,
        category: DeckCategory,
        pool: &TemplatePool,
    ) -> Result<CardInstance, SnapshotError> {
        if self.id.category != category {
            return Err(SnapshotError::CategoryMismatch {
                id: self.id,
                expected: category,
            });
        }
        let template = pool
            .find(category, &self.template)
            .ok_or_else(|| SnapshotError::UnknownTemplate {
                category,
                name: self.template.clone(),
            })?;
        Ok(CardInstance::new(self.id, template.clone()))
    }
}

/// Saved state of one deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    pub category: DeckCategory,
    pub difficulty: Difficulty,
    pub rng: DeckRngState,
    pub next_serial: u32,
    pub built_count: usize,
    pub draw_pile: Vec<CardRecord>,
    pub discard_pile: Vec<CardRecord>,
    pub history: Vec<CardRecord>,
}

/// Saved state of a whole collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub difficulty: Difficulty,
    pub decks: Vec<DeckSnapshot>,
}

impl CollectionSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// The snapshot for `category`, if present.
    #[must_use]
    pub fn deck(&self, category: DeckCategory) -> Option<&DeckSnapshot> {
        self.decks.iter().find(|d| d.category == category)
    }
}
