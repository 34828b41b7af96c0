//! Deck categories and difficulty modes.
//!
//! Both are closed enumerations. A category is only a partition key over
//! the one `CardTemplate` shape; it carries no behavior of its own.

use serde::{Deserialize, Serialize};

/// Which physical weapon deck a template belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeckCategory {
    /// Starting equipment handed out at setup. The smallest deck.
    Starting,
    /// The main equipment deck.
    Regular,
    /// Ultrared weapons.
    Ultrared,
}

impl DeckCategory {
    /// All categories, in index order.
    pub const ALL: [DeckCategory; 3] = [Self::Starting, Self::Regular, Self::Ultrared];

    /// Dense index in `0..3`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Starting => 0,
            Self::Regular => 1,
            Self::Ultrared => 2,
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Regular => "regular",
            Self::Ultrared => "ultrared",
        }
    }
}

impl std::fmt::Display for DeckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Difficulty mode. Controls how many copies of each template get built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Strong weapons are weighted up.
    Easy,
    /// Every template contributes exactly its base count.
    #[default]
    Medium,
    /// Weak weapons are weighted up.
    Hard,
}

impl Difficulty {
    /// All modes.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(label)
    }
}
