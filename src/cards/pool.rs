//! Template pool: the externally owned list of card kinds.
//!
//! The pool is ordered. Deck builds walk it front to back, so the
//! pre-shuffle order of a fresh deck follows the pool order.

use std::sync::Arc;

use super::category::DeckCategory;
use super::definition::CardTemplate;

/// Ordered pool of card templates across all categories.
///
/// ## Example
///
/// ```
/// use weapon_decks::cards::{CardTemplate, DeckCategory, TemplatePool};
///
/// let pool: TemplatePool = vec![
///     CardTemplate::new("Axe", DeckCategory::Regular, 3),
///     CardTemplate::new("Pan", DeckCategory::Starting, 1),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(pool.for_category(DeckCategory::Regular).len(), 1);
/// assert!(pool.find(DeckCategory::Starting, "Pan").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TemplatePool {
    templates: Vec<Arc<CardTemplate>>,
}

impl TemplatePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template.
    pub fn register(&mut self, template: CardTemplate) {
        self.templates.push(Arc::new(template));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.templates.iter()
    }

    /// Templates of one category, in pool order.
    #[must_use]
    pub fn for_category(&self, category: DeckCategory) -> Vec<Arc<CardTemplate>> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    /// First template in `category` with the given name.
    #[must_use]
    pub fn find(&self, category: DeckCategory, name: &str) -> Option<&Arc<CardTemplate>> {
        self.templates
            .iter()
            .find(|t| t.category == category && t.name == name)
    }
}

impl From<Vec<CardTemplate>> for TemplatePool {
    fn from(templates: Vec<CardTemplate>) -> Self {
        templates.into_iter().collect()
    }
}

impl FromIterator<CardTemplate> for TemplatePool {
    fn from_iter<I: IntoIterator<Item = CardTemplate>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().map(Arc::new).collect(),
        }
    }
}
