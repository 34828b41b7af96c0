//! Card templates - static weapon card data.
//!
//! `CardTemplate` holds the immutable properties of a weapon card kind.
//! For example, "Pistol" rolls 1 die, hits on 4+ and deals 1 damage -
//! these are part of the template, shared by every physical copy.
//!
//! Per-copy identity lives separately in `CardInstance`.

use serde::{Deserialize, Serialize};

use super::category::DeckCategory;

/// Broad weapon category printed on the card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Melee,
    Ranged,
    /// Usable both in melee and at range.
    Versatile,
    /// Equipment without a combat profile.
    Item,
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use weapon_decks::cards::{CardTemplate, DeckCategory, WeaponKind};
///
/// let pistol = CardTemplate::new("Pistol", DeckCategory::Regular, 2)
///     .with_kind(WeaponKind::Ranged)
///     .with_dice(1)
///     .with_accuracy("4+")
///     .with_damage(1)
///     .with_range(0, 1);
///
/// assert_eq!(pistol.accuracy_value(), Some(4));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Display name. Adjacent copies with the same name are what the
    /// shuffle tries to avoid.
    pub name: String,

    /// Expansion the card ships in.
    #[serde(default)]
    pub expansion: String,

    /// Which deck the template belongs to.
    pub category: DeckCategory,

    /// Base copy count before difficulty weighting.
    pub count: u32,

    #[serde(default)]
    pub kind: WeaponKind,

    /// Dice rolled per attack.
    #[serde(default)]
    pub dice: Option<u32>,

    /// Accuracy descriptor as printed, e.g. `"4+"`.
    #[serde(default)]
    pub accuracy: Option<String>,

    #[serde(default)]
    pub damage: Option<u32>,

    #[serde(default)]
    pub range_min: Option<u32>,

    #[serde(default)]
    pub range_max: Option<u32>,

    /// Ammo type, e.g. "bullets" or "shells".
    #[serde(default)]
    pub ammo: Option<String>,

    #[serde(default)]
    pub opens_doors: bool,

    /// Opening a door with this weapon makes noise.
    #[serde(default)]
    pub door_noise: bool,

    /// Attacking with this weapon makes noise.
    #[serde(default)]
    pub kill_noise: bool,

    #[serde(default)]
    pub dual: bool,

    #[serde(default)]
    pub overload: bool,

    /// Free-text special rule.
    #[serde(default)]
    pub special: Option<String>,
}

impl CardTemplate {
    /// Create a template with no combat profile.
    #[must_use]
    pub fn new(name: impl Into<String>, category: DeckCategory, count: u32) -> Self {
        Self {
            name: name.into(),
            expansion: String::new(),
            category,
            count,
            kind: WeaponKind::default(),
            dice: None,
            accuracy: None,
            damage: None,
            range_min: None,
            range_max: None,
            ammo: None,
            opens_doors: false,
            door_noise: false,
            kill_noise: false,
            dual: false,
            overload: false,
            special: None,
        }
    }

    #[must_use]
    pub fn with_expansion(mut self, expansion: impl Into<String>) -> Self {
        self.expansion = expansion.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: WeaponKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_dice(mut self, dice: u32) -> Self {
        self.dice = Some(dice);
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: impl Into<String>) -> Self {
        self.accuracy = Some(accuracy.into());
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        self.range_min = Some(min);
        self.range_max = Some(max);
        self
    }

    #[must_use]
    pub fn with_ammo(mut self, ammo: impl Into<String>) -> Self {
        self.ammo = Some(ammo.into());
        self
    }

    /// Set door behavior: whether it opens doors and whether that is noisy.
    #[must_use]
    pub fn with_doors(mut self, opens: bool, noisy: bool) -> Self {
        self.opens_doors = opens;
        self.door_noise = noisy;
        self
    }

    #[must_use]
    pub fn with_kill_noise(mut self, noisy: bool) -> Self {
        self.kill_noise = noisy;
        self
    }

    #[must_use]
    pub fn with_dual(mut self, dual: bool) -> Self {
        self.dual = dual;
        self
    }

    #[must_use]
    pub fn with_overload(mut self, overload: bool) -> Self {
        self.overload = overload;
        self
    }

    #[must_use]
    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = Some(special.into());
        self
    }

    /// Numeric accuracy: the leading decimal digits of the descriptor.
    ///
    /// `"5+"` and `"5"` both give 5; `"-"` or a missing descriptor gives `None`.
    #[must_use]
    pub fn accuracy_value(&self) -> Option<u32> {
        let text = self.accuracy.as_deref()?.trim();
        let end = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        text[..end].parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_builder() {
        let card = CardTemplate::new("Chainsaw", DeckCategory::Regular, 2)
            .with_expansion("Core")
            .with_kind(WeaponKind::Melee)
            .with_dice(5)
            .with_accuracy("5+")
            .with_damage(2)
            .with_range(0, 0)
            .with_doors(true, true)
            .with_kill_noise(true);

        assert_eq!(card.name, "Chainsaw");
        assert_eq!(card.expansion, "Core");
        assert_eq!(card.count, 2);
        assert_eq!(card.dice, Some(5));
        assert_eq!(card.damage, Some(2));
        assert_eq!(card.range_max, Some(0));
        assert!(card.opens_doors);
        assert!(card.door_noise);
        assert!(!card.dual);
    }

    #[test]
    fn test_accuracy_value() {
        let mut card = CardTemplate::new("Test", DeckCategory::Regular, 1);
        assert_eq!(card.accuracy_value(), None);

        card.accuracy = Some("5+".into());
        assert_eq!(card.accuracy_value(), Some(5));

        card.accuracy = Some(" 6 ".into());
        assert_eq!(card.accuracy_value(), Some(6));

        card.accuracy = Some("-".into());
        assert_eq!(card.accuracy_value(), None);

        card.accuracy = Some(String::new());
        assert_eq!(card.accuracy_value(), None);
    }

    #[test]
    fn test_template_from_sparse_json() {
        let json = r#"{"name": "Flashlight", "category": "Starting", "count": 1, "kind": "Item"}"#;
        let card: CardTemplate = serde_json::from_str(json).unwrap();

        assert_eq!(card.name, "Flashlight");
        assert_eq!(card.category, DeckCategory::Starting);
        assert_eq!(card.kind, WeaponKind::Item);
        assert_eq!(card.dice, None);
        assert!(!card.overload);
    }
}
