//! Difficulty weighting for deck builds.
//!
//! Each qualifying condition adds one more base-count of copies:
//!
//! | Mode   | +1 base if          | +1 base if   | +1 base if     | Max |
//! |--------|---------------------|--------------|----------------|-----|
//! | Easy   | dice >= 4           | damage >= 3  |                | 3x  |
//! | Medium |                     |              |                | 1x  |
//! | Hard   | dice <= 2           | damage <= 1  | accuracy >= 5  | 4x  |
//!
//! A template missing an attribute never meets the matching condition.

use crate::cards::{CardTemplate, Difficulty};

/// Copies-per-base multiplier for a template under `difficulty`.
#[must_use]
pub fn multiplier(template: &CardTemplate, difficulty: Difficulty) -> u32 {
    let conditions = match difficulty {
        Difficulty::Easy => [
            template.dice.is_some_and(|d| d >= 4),
            template.damage.is_some_and(|d| d >= 3),
            false,
        ],
        Difficulty::Medium => [false; 3],
        Difficulty::Hard => [
            template.dice.is_some_and(|d| d <= 2),
            template.damage.is_some_and(|d| d <= 1),
            template.accuracy_value().is_some_and(|a| a >= 5),
        ],
    };

    1 + conditions.iter().filter(|&&met| met).count() as u32
}

/// Number of instances built for a template under `difficulty`.
#[must_use]
pub fn effective_count(template: &CardTemplate, difficulty: Difficulty) -> u32 {
    template.count * multiplier(template, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DeckCategory;

    fn template(count: u32) -> CardTemplate {
        CardTemplate::new("Test", DeckCategory::Regular, count)
    }

    #[test]
    fn test_medium_is_base() {
        let card = template(3).with_dice(6).with_damage(3).with_accuracy("6+");
        assert_eq!(effective_count(&card, Difficulty::Medium), 3);
    }

    #[test]
    fn test_easy_conditions_stack() {
        assert_eq!(effective_count(&template(2).with_dice(4), Difficulty::Easy), 4);
        assert_eq!(effective_count(&template(2).with_damage(3), Difficulty::Easy), 4);
        assert_eq!(
            effective_count(&template(2).with_dice(5).with_damage(3), Difficulty::Easy),
            6
        );
        assert_eq!(
            effective_count(&template(2).with_dice(3).with_damage(2), Difficulty::Easy),
            2
        );
    }

    #[test]
    fn test_hard_conditions_stack() {
        let weak = template(1).with_dice(1).with_damage(1).with_accuracy("5+");
        assert_eq!(multiplier(&weak, Difficulty::Hard), 4);

        let partial = template(2).with_dice(2).with_damage(2).with_accuracy("4+");
        assert_eq!(effective_count(&partial, Difficulty::Hard), 4);
    }

    #[test]
    fn test_missing_attributes_never_qualify() {
        let bare = template(3);
        for difficulty in Difficulty::ALL {
            assert_eq!(effective_count(&bare, difficulty), 3);
        }

        let unparseable = template(1).with_accuracy("-");
        assert_eq!(multiplier(&unparseable, Difficulty::Hard), 1);
    }

    #[test]
    fn test_zero_count_contributes_nothing() {
        let card = template(0).with_dice(1).with_damage(0);
        assert_eq!(effective_count(&card, Difficulty::Hard), 0);
    }
}
