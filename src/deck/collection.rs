//! The three weapon decks of a session, kept at one shared difficulty.

use smallvec::SmallVec;

use super::snapshot::{CollectionSnapshot, SnapshotError};
use super::state::{DeckState, ShuffleOutcome};
use crate::cards::{CardInstance, DeckCategory, Difficulty, TemplatePool};
use crate::core::{ConfigError, DeckConfig};

/// One `DeckState` per category plus the shared difficulty.
///
/// Every deck always reports the collection's difficulty.
///
/// ## Example
///
/// ```
/// use weapon_decks::cards::{CardTemplate, DeckCategory, Difficulty, TemplatePool};
/// use weapon_decks::deck::DeckCollection;
///
/// let pool = TemplatePool::from(vec![
///     CardTemplate::new("Pan", DeckCategory::Starting, 1),
///     CardTemplate::new("Axe", DeckCategory::Regular, 3).with_dice(1).with_damage(2),
/// ]);
///
/// let mut decks = DeckCollection::new(&pool, Difficulty::Medium);
/// assert_eq!(decks.deck(DeckCategory::Regular).remaining_count(), 3);
///
/// decks.set_difficulty(Difficulty::Hard);
/// assert_eq!(decks.deck(DeckCategory::Regular).remaining_count(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct DeckCollection {
    decks: [DeckState; 3],
    difficulty: Difficulty,
    config: DeckConfig,
}

impl DeckCollection {
    /// Build all three decks with default configuration.
    #[must_use]
    pub fn new(pool: &TemplatePool, difficulty: Difficulty) -> Self {
        Self::build(pool, DeckConfig::default().with_difficulty(difficulty))
    }

    /// Build all three decks from a validated configuration.
    pub fn with_config(pool: &TemplatePool, config: DeckConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(pool, config))
    }

    fn build(pool: &TemplatePool, config: DeckConfig) -> Self {
        let difficulty = config.initial_difficulty;
        let decks = DeckCategory::ALL.map(|c| DeckState::new(c, difficulty, pool, &config));
        Self {
            decks,
            difficulty,
            config,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self, category: DeckCategory) -> &DeckState {
        &self.decks[category.index()]
    }

    /// Mutable access for play. Difficulty and pool changes go through the
    /// collection, so the handle does not expose them.
    pub fn deck_mut(&mut self, category: DeckCategory) -> DeckHandle<'_> {
        DeckHandle {
            deck: &mut self.decks[category.index()],
        }
    }

    /// All decks in category order.
    pub fn decks(&self) -> impl Iterator<Item = &DeckState> {
        self.decks.iter()
    }

    /// Cards left across every draw pile.
    #[must_use]
    pub fn total_remaining(&self) -> usize {
        self.decks.iter().map(DeckState::remaining_count).sum()
    }

    /// Change the shared difficulty. Rebuilds every deck if it actually changed.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.difficulty {
            return;
        }

        #[cfg(feature = "trace")]
        tracing::info!(from = %self.difficulty, to = %difficulty, "difficulty changed");

        self.difficulty = difficulty;
        for deck in &mut self.decks {
            deck.change_difficulty(difficulty);
        }
    }

    /// Rebuild every deck at the current difficulty.
    pub fn reset_all(&mut self) {
        for deck in &mut self.decks {
            deck.reset();
        }
    }

    /// Hand the full unfiltered pool to every deck; each keeps its own category.
    pub fn update_pool(&mut self, pool: &TemplatePool) {
        #[cfg(feature = "trace")]
        tracing::info!(templates = pool.len(), "template pool updated");

        for deck in &mut self.decks {
            deck.update_source_pool(pool);
        }
    }

    /// Capture every deck.
    #[must_use]
    pub fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            difficulty: self.difficulty,
            decks: self.decks.iter().map(DeckState::snapshot).collect(),
        }
    }

    /// Restore a collection from a snapshot, resolving templates against `pool`.
    pub fn restore(
        snapshot: &CollectionSnapshot,
        pool: &TemplatePool,
        config: DeckConfig,
    ) -> Result<Self, SnapshotError> {
        config.validate()?;

        let restore_one = |category: DeckCategory| -> Result<DeckState, SnapshotError> {
            let deck = snapshot
                .deck(category)
                .ok_or(SnapshotError::MissingDeck(category))?;
            if deck.difficulty != snapshot.difficulty {
                return Err(SnapshotError::DifficultyMismatch {
                    category,
                    expected: snapshot.difficulty,
                    found: deck.difficulty,
                });
            }
            DeckState::restore(deck, pool, &config)
        };

        let decks = [
            restore_one(DeckCategory::Starting)?,
            restore_one(DeckCategory::Regular)?,
            restore_one(DeckCategory::Ultrared)?,
        ];
        Ok(Self {
            decks,
            difficulty: snapshot.difficulty,
            config,
        })
    }
}

/// Play-time access to one deck of a collection.
///
/// Reads go through `Deref` to `DeckState`. Only pile operations are
/// forwarded, so a deck can never drift from the collection's difficulty.
#[derive(Debug)]
pub struct DeckHandle<'a> {
    deck: &'a mut DeckState,
}

impl DeckHandle<'_> {
    pub fn draw(&mut self) -> Option<CardInstance> {
        self.deck.draw()
    }

    pub fn draw_two(&mut self) -> SmallVec<[CardInstance; 2]> {
        self.deck.draw_two()
    }

    pub fn draw_many(&mut self, count: usize) -> Vec<CardInstance> {
        self.deck.draw_many(count)
    }

    pub fn discard(&mut self, card: CardInstance) -> bool {
        self.deck.discard(card)
    }

    pub fn return_to_top(&mut self, card: &CardInstance) -> bool {
        self.deck.return_to_top(card)
    }

    pub fn return_to_bottom(&mut self, card: &CardInstance) -> bool {
        self.deck.return_to_bottom(card)
    }

    pub fn remove_from_discard(&mut self, card: &CardInstance) -> Option<CardInstance> {
        self.deck.remove_from_discard(card)
    }

    pub fn reclaim_all_discard(&mut self, shuffle: bool) {
        self.deck.reclaim_all_discard(shuffle);
    }

    pub fn clear_discard(&mut self) {
        self.deck.clear_discard();
    }

    pub fn shuffle(&mut self) -> ShuffleOutcome {
        self.deck.shuffle()
    }

    /// Rebuild this deck at the collection's difficulty.
    pub fn reset(&mut self) {
        self.deck.reset();
    }
}

impl std::ops::Deref for DeckHandle<'_> {
    type Target = DeckState;

    fn deref(&self) -> &DeckState {
        &*self.deck
    }
}
