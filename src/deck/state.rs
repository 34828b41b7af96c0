//! One physical weapon deck: draw pile, discard pile, and draw history.
//!
//! ## Lifecycle
//!
//! ```text
//! build -> shuffle -> draw <-> discard -> reshuffle on exhaustion
//!                        \_______________________ reset (rebuild)
//! ```
//!
//! A drawn card leaves both piles and is owned by the caller until it is
//! handed back through `discard`. The engine never tracks where in-play
//! cards are.
//!
//! ## Rebuilds are destructive
//!
//! `reset`, `change_difficulty` and `update_source_pool` throw away the
//! draw pile, discard pile and history without asking. Callers that need
//! to keep that state must snapshot or gate the call themselves.
//!
//! ## Shuffle contract
//!
//! The shuffle tries up to `shuffle_attempts` full permutations looking for
//! an order with no two same-named cards adjacent, then keeps whatever the
//! last attempt produced. An adjacent duplicate after a shuffle is an
//! accepted outcome, not an error.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::snapshot::{CardRecord, DeckSnapshot, SnapshotError};
use super::weighting::effective_count;
use crate::cards::{CardInstance, CardTemplate, DeckCategory, Difficulty, InstanceId, TemplatePool};
use crate::core::{DeckConfig, DeckRng};

/// Result of one `shuffle` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleOutcome {
    /// Permutations tried.
    pub attempts: u32,
    /// True if the final order has no two same-named cards adjacent.
    pub separated: bool,
}

/// State of one weapon deck.
///
/// ## Example
///
/// ```
/// use weapon_decks::cards::{CardTemplate, DeckCategory, Difficulty, TemplatePool};
/// use weapon_decks::core::DeckConfig;
/// use weapon_decks::deck::DeckState;
///
/// let pool = TemplatePool::from(vec![
///     CardTemplate::new("Axe", DeckCategory::Regular, 3),
///     CardTemplate::new("Pistol", DeckCategory::Regular, 2),
/// ]);
///
/// let mut deck = DeckState::new(DeckCategory::Regular, Difficulty::Medium, &pool, &DeckConfig::default());
/// assert_eq!(deck.remaining_count(), 5);
///
/// let card = deck.draw().unwrap();
/// deck.discard(card.clone());
/// assert!(deck.return_to_top(&card));
/// assert_eq!(deck.peek(), Some(&card));
/// ```
#[derive(Clone, Debug)]
pub struct DeckState {
    category: DeckCategory,
    difficulty: Difficulty,

    /// Source templates, already filtered to `category`.
    templates: Vec<Arc<CardTemplate>>,

    /// Front is the next card drawn.
    draw_pile: Vector<CardInstance>,

    /// Front is the most recently discarded.
    discard_pile: Vector<CardInstance>,

    /// Front is the most recently drawn. Never pruned except by reset.
    history: Vector<CardInstance>,

    rng: DeckRng,
    shuffle_attempts: u32,
    recent_len: usize,

    /// Next instance serial. Never rewound, so ids stay unique across builds.
    next_serial: u32,

    /// Instances materialized since the last reset.
    built_count: usize,
}

impl DeckState {
    /// Build and shuffle a deck for `category` from the matching templates in `pool`.
    ///
    /// The deck's RNG stream is derived from `config.seed` and the category.
    #[must_use]
    pub fn new(
        category: DeckCategory,
        difficulty: Difficulty,
        pool: &TemplatePool,
        config: &DeckConfig,
    ) -> Self {
        let rng = DeckRng::new(config.seed).for_context(category.name());
        let mut deck = Self::empty(category, difficulty, pool.for_category(category), rng, config);
        deck.reset();
        deck
    }

    fn empty(
        category: DeckCategory,
        difficulty: Difficulty,
        templates: Vec<Arc<CardTemplate>>,
        rng: DeckRng,
        config: &DeckConfig,
    ) -> Self {
        Self {
            category,
            difficulty,
            templates,
            draw_pile: Vector::new(),
            discard_pile: Vector::new(),
            history: Vector::new(),
            rng,
            shuffle_attempts: config.shuffle_attempts,
            recent_len: config.recent_draws,
            next_serial: 0,
            built_count: 0,
        }
    }

    // === Build ===

    /// Materialize fresh instances for every template at the current difficulty.
    fn build_deck(&mut self) -> Vec<CardInstance> {
        let mut cards = Vec::with_capacity(self.build_size());
        for template in &self.templates {
            for _ in 0..effective_count(template, self.difficulty) {
                let id = InstanceId::new(self.category, self.next_serial);
                self.next_serial += 1;
                cards.push(CardInstance::new(id, Arc::clone(template)));
            }
        }
        cards
    }

    /// Size of a full build at the current difficulty.
    #[must_use]
    pub fn build_size(&self) -> usize {
        self.templates
            .iter()
            .map(|t| effective_count(t, self.difficulty) as usize)
            .sum()
    }

    /// Rebuild the draw pile and clear discard and history.
    pub fn reset(&mut self) {
        let cards = self.build_deck();
        self.built_count = cards.len();
        self.draw_pile = Vector::from(cards);
        self.discard_pile.clear();
        self.history.clear();

        #[cfg(feature = "trace")]
        tracing::debug!(
            category = %self.category,
            difficulty = %self.difficulty,
            size = self.built_count,
            "deck rebuilt"
        );

        self.shuffle();
    }

    /// Switch difficulty and rebuild.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset();
    }

    /// Replace the source templates with this category's share of `pool`, then rebuild.
    pub fn update_source_pool(&mut self, pool: &TemplatePool) {
        self.templates = pool.for_category(self.category);
        self.reset();
    }

    // === Shuffle ===

    /// Randomize the draw pile, trying to keep same-named cards apart.
    pub fn shuffle(&mut self) -> ShuffleOutcome {
        let mut cards: Vec<CardInstance> = self.draw_pile.iter().cloned().collect();

        if cards.len() <= 1 {
            self.rng.shuffle(&mut cards);
            self.draw_pile = Vector::from(cards);
            return ShuffleOutcome {
                attempts: 1,
                separated: true,
            };
        }

        let max_attempts = self.shuffle_attempts.max(1);
        let mut outcome = ShuffleOutcome {
            attempts: 0,
            separated: false,
        };
        while outcome.attempts < max_attempts {
            outcome.attempts += 1;
            self.rng.shuffle(&mut cards);
            if !adjacent_duplicate(&cards) {
                outcome.separated = true;
                break;
            }
        }
        self.draw_pile = Vector::from(cards);

        #[cfg(feature = "trace")]
        tracing::trace!(
            category = %self.category,
            attempts = outcome.attempts,
            separated = outcome.separated,
            "shuffled"
        );

        outcome
    }

    /// Refill an empty draw pile: recycle the discard pile, or rebuild from
    /// scratch if there is nothing to recycle.
    fn reshuffle_on_exhaustion(&mut self) {
        if !self.discard_pile.is_empty() {
            let recycled = std::mem::take(&mut self.discard_pile);

            #[cfg(feature = "trace")]
            tracing::debug!(category = %self.category, cards = recycled.len(), "recycling discard pile");

            self.draw_pile.append(recycled);
        } else {
            let fresh = self.build_deck();
            self.built_count += fresh.len();

            #[cfg(feature = "trace")]
            tracing::debug!(category = %self.category, size = fresh.len(), "emergency rebuild");

            self.draw_pile = Vector::from(fresh);
        }
        self.shuffle();
    }

    // === Draw ===

    /// Take the top card, refilling the pile first if it is empty.
    ///
    /// Returns `None` only when this category has no templates to build from.
    pub fn draw(&mut self) -> Option<CardInstance> {
        if self.draw_pile.is_empty() {
            self.reshuffle_on_exhaustion();
        }
        let card = self.draw_pile.pop_front()?;
        self.history.push_front(card.clone());
        Some(card)
    }

    /// Draw up to two cards, stopping at the first failure.
    pub fn draw_two(&mut self) -> SmallVec<[CardInstance; 2]> {
        let mut drawn = SmallVec::new();
        for _ in 0..2 {
            match self.draw() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Draw up to `count` cards, stopping at the first failure.
    pub fn draw_many(&mut self, count: usize) -> Vec<CardInstance> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    // === Discard ===

    /// Put a card on top of the discard pile.
    ///
    /// Cards from another category's deck, or already sitting in one of this
    /// deck's piles, are ignored and false is returned.
    pub fn discard(&mut self, card: CardInstance) -> bool {
        if card.id.category != self.category
            || self.discard_pile.contains(&card)
            || self.draw_pile.contains(&card)
        {
            return false;
        }
        self.discard_pile.push_front(card);
        true
    }

    /// Move a card from the discard pile to the top of the draw pile.
    ///
    /// Returns false (and does nothing) if the card is not in the discard pile.
    pub fn return_to_top(&mut self, card: &CardInstance) -> bool {
        match self.take_from_discard(card) {
            Some(card) => {
                self.draw_pile.push_front(card);
                true
            }
            None => false,
        }
    }

    /// Move a card from the discard pile to the bottom of the draw pile.
    ///
    /// Returns false (and does nothing) if the card is not in the discard pile.
    pub fn return_to_bottom(&mut self, card: &CardInstance) -> bool {
        match self.take_from_discard(card) {
            Some(card) => {
                self.draw_pile.push_back(card);
                true
            }
            None => false,
        }
    }

    /// Take a card out of the discard flow entirely (e.g. into an inventory).
    pub fn remove_from_discard(&mut self, card: &CardInstance) -> Option<CardInstance> {
        self.take_from_discard(card)
    }

    fn take_from_discard(&mut self, card: &CardInstance) -> Option<CardInstance> {
        let index = self.discard_pile.index_of(card)?;
        Some(self.discard_pile.remove(index))
    }

    /// Move the whole discard pile under the draw pile, optionally shuffling.
    pub fn reclaim_all_discard(&mut self, shuffle: bool) {
        let reclaimed = std::mem::take(&mut self.discard_pile);
        self.draw_pile.append(reclaimed);
        if shuffle {
            self.shuffle();
        }
    }

    /// Drop every card in the discard pile from the simulation.
    pub fn clear_discard(&mut self) {
        self.discard_pile.clear();
    }

    // === Views ===

    #[must_use]
    pub fn category(&self) -> DeckCategory {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Source templates for this category.
    #[must_use]
    pub fn templates(&self) -> &[Arc<CardTemplate>] {
        &self.templates
    }

    /// Discard pile, most recent first.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardInstance> {
        &self.discard_pile
    }

    /// Every draw since the last reset, most recent first.
    #[must_use]
    pub fn draw_history(&self) -> &Vector<CardInstance> {
        &self.history
    }

    /// The first few entries of the draw history.
    #[must_use]
    pub fn recent_draws(&self) -> Vector<CardInstance> {
        self.history.take(self.recent_len.min(self.history.len()))
    }

    /// Next card to be drawn, without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&CardInstance> {
        self.draw_pile.front()
    }

    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    /// True if the draw pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty()
    }

    /// Instances materialized since the last reset, emergency rebuilds included.
    #[must_use]
    pub fn built_count(&self) -> usize {
        self.built_count
    }

    /// Cards outside both piles, i.e. held by the caller or removed.
    #[must_use]
    pub fn in_play_count(&self) -> usize {
        self.built_count
            .saturating_sub(self.draw_pile.len() + self.discard_pile.len())
    }

    /// True if two same-named cards currently sit next to each other in the draw pile.
    #[must_use]
    pub fn has_adjacent_duplicate(&self) -> bool {
        self.draw_pile
            .iter()
            .zip(self.draw_pile.iter().skip(1))
            .any(|(a, b)| a.name() == b.name())
    }

    // === Snapshots ===

    /// Capture everything needed to resume this deck later.
    #[must_use]
    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            category: self.category,
            difficulty: self.difficulty,
            rng: self.rng.state(),
            next_serial: self.next_serial,
            built_count: self.built_count,
            draw_pile: self.draw_pile.iter().map(CardRecord::from).collect(),
            discard_pile: self.discard_pile.iter().map(CardRecord::from).collect(),
            history: self.history.iter().map(CardRecord::from).collect(),
        }
    }

    /// Rebuild a deck from a snapshot, resolving template names against `pool`.
    pub fn restore(
        snapshot: &DeckSnapshot,
        pool: &TemplatePool,
        config: &DeckConfig,
    ) -> Result<Self, SnapshotError> {
        let resolve = |records: &[CardRecord]| -> Result<Vector<CardInstance>, SnapshotError> {
            records
                .iter()
                .map(|record| record.resolve(snapshot.category, pool))
                .collect()
        };

        let mut deck = Self::empty(
            snapshot.category,
            snapshot.difficulty,
            pool.for_category(snapshot.category),
            DeckRng::from_state(&snapshot.rng),
            config,
        );
        deck.draw_pile = resolve(snapshot.draw_pile.as_slice())?;
        deck.discard_pile = resolve(snapshot.discard_pile.as_slice())?;
        deck.history = resolve(snapshot.history.as_slice())?;

        let mut tracked = FxHashSet::default();
        for card in deck.draw_pile.iter().chain(deck.discard_pile.iter()) {
            if !tracked.insert(card.id) {
                return Err(SnapshotError::DuplicateCard(card.id));
            }
        }
        let stale = deck
            .draw_pile
            .iter()
            .chain(deck.discard_pile.iter())
            .chain(deck.history.iter())
            .find(|card| card.id.serial >= snapshot.next_serial);
        if let Some(card) = stale {
            return Err(SnapshotError::StaleSerial {
                id: card.id,
                next_serial: snapshot.next_serial,
            });
        }

        deck.next_serial = snapshot.next_serial;
        deck.built_count = snapshot.built_count;
        Ok(deck)
    }
}

fn adjacent_duplicate(cards: &[CardInstance]) -> bool {
    cards.windows(2).any(|pair| pair[0].name() == pair[1].name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> TemplatePool {
        TemplatePool::from(vec![
            CardTemplate::new("Axe", DeckCategory::Regular, 3),
            CardTemplate::new("Pistol", DeckCategory::Regular, 2),
            CardTemplate::new("Pan", DeckCategory::Starting, 1),
        ])
    }

    fn regular(difficulty: Difficulty) -> DeckState {
        DeckState::new(DeckCategory::Regular, difficulty, &pool(), &DeckConfig::default())
    }

    #[test]
    fn test_new_deck_is_full() {
        let deck = regular(Difficulty::Medium);
        assert_eq!(deck.remaining_count(), 5);
        assert_eq!(deck.discard_count(), 0);
        assert!(deck.draw_history().is_empty());
        assert_eq!(deck.built_count(), 5);
        assert_eq!(deck.in_play_count(), 0);
    }

    #[test]
    fn test_build_filters_category() {
        let deck = DeckState::new(
            DeckCategory::Starting,
            Difficulty::Medium,
            &pool(),
            &DeckConfig::default(),
        );
        assert_eq!(deck.remaining_count(), 1);
        assert_eq!(deck.templates().len(), 1);
        assert_eq!(deck.peek().unwrap().name(), "Pan");
    }

    #[test]
    fn test_instance_ids_unique() {
        use rustc_hash::FxHashSet;

        let mut deck = regular(Difficulty::Medium);
        let first = deck.draw_many(5);
        deck.reset();
        let second = deck.draw_many(5);

        let ids: FxHashSet<_> = first.iter().chain(second.iter()).map(|c| c.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_draw_records_history() {
        let mut deck = regular(Difficulty::Medium);
        let drawn = deck.draw_many(4);

        assert_eq!(deck.draw_history().len(), 4);
        assert_eq!(deck.draw_history().front(), drawn.last());

        let recent = deck.recent_draws();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0], drawn[3]);
        assert_eq!(recent[2], drawn[1]);
    }

    #[test]
    fn test_recent_draws_shorter_than_limit() {
        let mut deck = regular(Difficulty::Medium);
        deck.draw();
        assert_eq!(deck.recent_draws().len(), 1);
    }

    #[test]
    fn test_draw_two() {
        let mut deck = regular(Difficulty::Medium);
        let drawn = deck.draw_two();
        assert_eq!(drawn.len(), 2);
        assert_eq!(deck.remaining_count(), 3);
        assert_eq!(deck.in_play_count(), 2);
    }

    #[test]
    fn test_draw_from_empty_pool() {
        let mut deck = DeckState::new(
            DeckCategory::Ultrared,
            Difficulty::Hard,
            &pool(),
            &DeckConfig::default(),
        );
        assert!(deck.is_empty());
        assert!(deck.draw().is_none());
        assert!(deck.draw_two().is_empty());
        assert!(deck.draw_history().is_empty());
    }

    #[test]
    fn test_discard_is_most_recent_first() {
        let mut deck = regular(Difficulty::Medium);
        let a = deck.draw().unwrap();
        let b = deck.draw().unwrap();
        deck.discard(a.clone());
        deck.discard(b.clone());

        assert_eq!(deck.discard_pile()[0], b);
        assert_eq!(deck.discard_pile()[1], a);
    }

    #[test]
    fn test_return_to_bottom() {
        let mut deck = regular(Difficulty::Medium);
        let card = deck.draw().unwrap();
        deck.discard(card.clone());

        assert!(deck.return_to_bottom(&card));
        assert_eq!(deck.discard_count(), 0);
        assert_eq!(deck.remaining_count(), 5);

        let rest = deck.draw_many(5);
        assert_eq!(rest.last(), Some(&card));
    }

    #[test]
    fn test_return_missing_card_is_noop() {
        let mut deck = regular(Difficulty::Medium);
        let card = deck.draw().unwrap();

        assert!(!deck.return_to_top(&card));
        assert!(!deck.return_to_bottom(&card));
        assert_eq!(deck.remaining_count(), 4);
    }

    #[test]
    fn test_remove_from_discard() {
        let mut deck = regular(Difficulty::Medium);
        let card = deck.draw().unwrap();
        deck.discard(card.clone());

        assert_eq!(deck.remove_from_discard(&card), Some(card.clone()));
        assert_eq!(deck.discard_count(), 0);
        assert_eq!(deck.remove_from_discard(&card), None);
        assert_eq!(deck.in_play_count(), 1);
    }

    #[test]
    fn test_reclaim_without_shuffle_appends() {
        let mut deck = regular(Difficulty::Medium);
        let card = deck.draw().unwrap();
        deck.discard(card.clone());

        deck.reclaim_all_discard(false);
        assert_eq!(deck.discard_count(), 0);
        assert_eq!(deck.remaining_count(), 5);
        assert_eq!(deck.draw_many(5).last(), Some(&card));
    }

    #[test]
    fn test_discard_ignores_foreign_and_tracked_cards() {
        let mut deck = regular(Difficulty::Medium);
        let card = deck.draw().unwrap();

        assert!(deck.discard(card.clone()));
        assert!(!deck.discard(card.clone()));
        assert_eq!(deck.discard_count(), 1);

        let on_top = deck.peek().cloned().unwrap();
        assert!(!deck.discard(on_top));
        assert_eq!(deck.discard_count(), 1);

        let mut starting = DeckState::new(
            DeckCategory::Starting,
            Difficulty::Medium,
            &pool(),
            &DeckConfig::default(),
        );
        let pan = starting.draw().unwrap();
        assert!(!deck.discard(pan));
        assert_eq!(deck.discard_count(), 1);
        assert_eq!(deck.remaining_count() + deck.discard_count(), deck.built_count());
    }

    #[test]
    fn test_restore_rejects_rewound_serial() {
        let mut deck = regular(Difficulty::Medium);
        let held = deck.draw().unwrap();

        let mut snapshot = deck.snapshot();
        snapshot.next_serial = 0;

        let err = DeckState::restore(&snapshot, &pool(), &DeckConfig::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::StaleSerial { next_serial: 0, .. }));

        // The untouched snapshot restores, and later builds never reuse the held id
        let mut restored =
            DeckState::restore(&deck.snapshot(), &pool(), &DeckConfig::default()).unwrap();
        let fresh = restored.draw_many(10);
        assert!(!fresh.contains(&held));
    }

    #[test]
    fn test_restore_rejects_duplicate_ids() {
        let mut deck = regular(Difficulty::Medium);
        let card = deck.draw().unwrap();
        deck.discard(card);

        let mut snapshot = deck.snapshot();
        let copy = snapshot.discard_pile[0].clone();
        snapshot.draw_pile.push(copy.clone());

        let err = DeckState::restore(&snapshot, &pool(), &DeckConfig::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateCard(id) if id == copy.id));
    }

    #[test]
    fn test_clear_discard() {
        let mut deck = regular(Difficulty::Medium);
        for card in deck.draw_two() {
            deck.discard(card);
        }
        deck.clear_discard();

        assert_eq!(deck.discard_count(), 0);
        assert_eq!(deck.remaining_count(), 3);
        assert_eq!(deck.in_play_count(), 2);
    }

    #[test]
    fn test_update_source_pool() {
        let mut deck = regular(Difficulty::Medium);
        deck.draw();

        let new_pool = TemplatePool::from(vec![
            CardTemplate::new("Shotgun", DeckCategory::Regular, 4),
            CardTemplate::new("Pan", DeckCategory::Starting, 9),
        ]);
        deck.update_source_pool(&new_pool);

        assert_eq!(deck.remaining_count(), 4);
        assert!(deck.draw_history().is_empty());
        assert!(deck.draw_many(4).iter().all(|c| c.name() == "Shotgun"));
    }

    #[test]
    fn test_single_card_shuffle() {
        let mut deck = DeckState::new(
            DeckCategory::Starting,
            Difficulty::Medium,
            &pool(),
            &DeckConfig::default(),
        );
        let outcome = deck.shuffle();
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.separated);
    }

    #[test]
    fn test_shuffle_gives_up_after_cap() {
        let pool = TemplatePool::from(vec![CardTemplate::new("Axe", DeckCategory::Regular, 4)]);
        let config = DeckConfig::default().with_shuffle_attempts(10);
        let mut deck = DeckState::new(DeckCategory::Regular, Difficulty::Medium, &pool, &config);

        let outcome = deck.shuffle();
        assert_eq!(outcome.attempts, 10);
        assert!(!outcome.separated);
        assert!(deck.has_adjacent_duplicate());
        assert_eq!(deck.remaining_count(), 4);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = regular(Difficulty::Medium);
        let mut b = regular(Difficulty::Medium);

        let names_a: Vec<_> = a.draw_many(5).iter().map(|c| c.name().to_string()).collect();
        let names_b: Vec<_> = b.draw_many(5).iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names_a, names_b);
    }
}
