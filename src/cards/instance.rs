//! Card instances - one physical copy of a template.
//!
//! Many instances share identical template data (a deck holds three Axes),
//! so every instance carries an `InstanceId`. Equality and hashing use
//! only the id: two Axes are different cards.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::category::DeckCategory;
use super::definition::CardTemplate;

/// Identity of one physical card.
///
/// Serials are allocated per deck and never reused, so the pair is unique
/// across every build a deck has ever made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId {
    pub category: DeckCategory,
    pub serial: u32,
}

impl InstanceId {
    #[must_use]
    pub const fn new(category: DeckCategory, serial: u32) -> Self {
        Self { category, serial }
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.category, self.serial)
    }
}

/// A physical card.
#[derive(Clone, Debug)]
pub struct CardInstance {
    pub id: InstanceId,
    pub template: Arc<CardTemplate>,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: InstanceId, template: Arc<CardTemplate>) -> Self {
        Self { id, template }
    }

    /// Display name of the underlying template.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    #[must_use]
    pub fn category(&self) -> DeckCategory {
        self.template.category
    }
}

impl PartialEq for CardInstance {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CardInstance {}

impl std::hash::Hash for CardInstance {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}
