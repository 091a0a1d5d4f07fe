//! Card instances - runtime card state.
//!
//! `Card` is one physical copy of a catalog card inside a battle. It keeps
//! both its current stats and the stats it was created with, so buffs and
//! debuffs can be shown and undone.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardStats, CardTemplate};
use super::element::Element;
use crate::core::entity::EntityId;
use crate::core::side::Side;

/// A card instance in a battle.
///
/// Which pile the card is in is tracked by the owner's `PileSet`, never
/// by the card itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique entity ID for this instance.
    pub(crate) entity: EntityId,

    /// Catalog entry this copy was created from.
    pub card_id: CardId,

    /// Participant whose piles hold this card. Only `BattleState` moves a
    /// card between sides.
    pub(crate) owner: Side,

    pub element: Element,

    pub rarity: u8,

    /// Current stats, changed by effects.
    pub stats: CardStats,

    /// Stats at creation.
    pub base: CardStats,

    /// Face-up to both participants.
    pub revealed: bool,
}

impl Card {
    /// Instantiate a template for a participant. New cards are face-down.
    #[must_use]
    pub fn from_template(entity: EntityId, template: &CardTemplate, owner: Side) -> Self {
        Self {
            entity,
            card_id: template.id,
            owner,
            element: template.element,
            rarity: template.rarity,
            stats: template.stats,
            base: template.stats,
            revealed: false,
        }
    }

    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[must_use]
    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Difference between current and original stats.
    #[must_use]
    pub fn stat_delta(&self) -> CardStats {
        self.stats.delta(self.base)
    }

    /// Check if any stat differs from the original.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.stats != self.base
    }

    /// Add to the current stats.
    pub fn modify_stats(&mut self, delta: CardStats) {
        self.stats = self.stats.plus(delta);
    }

    /// Restore original stats and turn the card face-down.
    pub fn reset(&mut self) {
        self.stats = self.base;
        self.revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> CardTemplate {
        CardTemplate::new(CardId::new(3), "Undine")
            .with_element(Element::Water)
            .with_stats(2, 4, 6)
            .with_rarity(1)
    }

    #[test]
    fn test_from_template() {
        let card = Card::from_template(EntityId(9), &template(), Side::Opponent);

        assert_eq!(card.card_id, CardId::new(3));
        assert_eq!(card.owner, Side::Opponent);
        assert_eq!(card.element, Element::Water);
        assert_eq!(card.stats, card.base);
        assert!(!card.revealed);
        assert!(!card.is_modified());
    }

    #[test]
    fn test_modify_and_reset() {
        let mut card = Card::from_template(EntityId(1), &template(), Side::Player);
        card.revealed = true;

        card.modify_stats(CardStats::new(1, -2, 0));
        assert_eq!(card.stats, CardStats::new(3, 2, 6));
        assert_eq!(card.stat_delta(), CardStats::new(1, -2, 0));
        assert!(card.is_modified());

        card.reset();
        assert_eq!(card.stats, CardStats::new(2, 4, 6));
        assert!(!card.revealed);
    }
}
