//! Duel participants.
//!
//! A `Participant` is one side of a duel: its piles, its health and shield
//! counters, the deck it brought, and the card it committed to this turn's
//! battle. Pile operations keep the at-most-one-location invariant through
//! `PileSet` and journal every move so the owning `BattleState` can report
//! it.
//!
//! Pile operations here only see this participant's cards. Moving a card
//! between sides, and the empty-library house rule, are handled by
//! `BattleState`.

use serde::{Deserialize, Serialize};

use super::config::{BattleConfig, DamageRule};
use super::entity::EntityId;
use super::rng::GameRng;
use super::side::Side;
use crate::battle::AiBehavior;
use crate::error::BattleError;
use crate::zones::{DrawFrom, PileId, PileLetter, PilePosition, PileSet};

/// One pile move, as journaled by a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileMove {
    pub entity: EntityId,
    /// `None` when the card was outside every pile.
    pub from: Option<PileId>,
    /// `None` when the card was removed from play.
    pub to: Option<PileId>,
}

/// One side of a duel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    side: Side,

    piles: PileSet,

    /// Current health. May exceed `max_health` through buffs.
    pub health: i64,

    pub max_health: i64,

    pub shield: i64,

    /// Name of the deck this participant brought.
    pub deck_name: Option<String>,

    /// Behaviour tag of a computer-controlled participant.
    pub ai: Option<AiBehavior>,

    /// Card committed in the current Main phase. It stays in the Hand
    /// until the Battle phase resolves it.
    pub battle_card: Option<EntityId>,

    /// Set when a draw failed under `EmptyLibraryRule::Lose`.
    pub decked_out: bool,

    #[serde(skip)]
    journal: Vec<PileMove>,
}

impl Participant {
    /// Create a participant with the configured starting counters and no
    /// cards.
    #[must_use]
    pub fn new(side: Side, config: &BattleConfig) -> Self {
        Self {
            side,
            piles: PileSet::new(),
            health: config.starting_health,
            max_health: config.max_health,
            shield: config.starting_shield,
            deck_name: None,
            ai: None,
            battle_card: None,
            decked_out: false,
            journal: Vec::new(),
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn piles(&self) -> &PileSet {
        &self.piles
    }

    /// Cards in a pile, bottom to top.
    #[must_use]
    pub fn pile(&self, pile: PileId) -> &[EntityId] {
        self.piles.cards(pile)
    }

    /// Cards in a custom pile, addressed by letter.
    pub fn custom_pile(&self, letter: char) -> Result<&[EntityId], BattleError> {
        Ok(self.pile(PileId::Custom(PileLetter::new(letter)?)))
    }

    #[must_use]
    pub fn library(&self) -> &[EntityId] {
        self.pile(PileId::Library)
    }

    #[must_use]
    pub fn hand(&self) -> &[EntityId] {
        self.pile(PileId::Hand)
    }

    #[must_use]
    pub fn discard(&self) -> &[EntityId] {
        self.pile(PileId::Discard)
    }

    #[must_use]
    pub fn exhaust(&self) -> &[EntityId] {
        self.pile(PileId::Exhaust)
    }

    /// Pile holding a card, if any.
    #[must_use]
    pub fn location(&self, entity: EntityId) -> Option<PileId> {
        self.piles.location(entity)
    }

    /// Move up to `count` cards from Library to Hand.
    ///
    /// Stops early when the Library runs out. Returns the number of cards
    /// actually moved.
    pub(crate) fn draw(&mut self, count: usize, from: DrawFrom) -> usize {
        let mut drawn = 0;
        while drawn < count {
            let Some(entity) = self.piles.transfer_one(PileId::Library, PileId::Hand, from) else {
                break;
            };
            self.journal.push(PileMove {
                entity,
                from: Some(PileId::Library),
                to: Some(PileId::Hand),
            });
            drawn += 1;
        }
        drawn
    }

    /// Uniformly permute a pile in place.
    pub fn shuffle(&mut self, pile: PileId, rng: &mut GameRng) {
        self.piles.shuffle(pile, rng);
    }

    /// Move every card of `pile` onto the Library. Returns the number moved.
    pub(crate) fn return_pile_to_library(&mut self, pile: PileId) -> usize {
        let moved = self.piles.transfer_all(pile, PileId::Library);
        self.journal.extend(moved.iter().map(|&entity| PileMove {
            entity,
            from: Some(pile),
            to: Some(PileId::Library),
        }));
        moved.len()
    }

    /// Put a card on top (or at the bottom) of a pile, moving it out of
    /// any pile of this participant that held it. Returns the old pile.
    pub(crate) fn add_card_to(&mut self, pile: PileId, entity: EntityId, at_bottom: bool) -> Option<PileId> {
        let position = if at_bottom { PilePosition::Bottom } else { PilePosition::Top };
        self.insert_at(pile, entity, position)
    }

    /// Put a card at an exact position of a pile.
    pub(crate) fn insert_at(&mut self, pile: PileId, entity: EntityId, position: PilePosition) -> Option<PileId> {
        let from = self.piles.insert(entity, pile, position);
        self.journal.push(PileMove {
            entity,
            from,
            to: Some(pile),
        });
        from
    }

    /// Take a card out of a pile. The card is then in none of this
    /// participant's piles.
    pub(crate) fn remove_card_from(&mut self, pile: PileId, entity: EntityId) -> Result<(), BattleError> {
        if !self.piles.is_in(entity, pile) {
            return Err(BattleError::NotInPile {
                entity,
                side: self.side,
                pile,
            });
        }
        self.piles.remove(entity);
        self.journal.push(PileMove {
            entity,
            from: Some(pile),
            to: None,
        });
        Ok(())
    }

    /// Apply damage. Returns the health actually lost.
    ///
    /// Health and shield never drop below zero.
    pub fn take_damage(&mut self, amount: i64, rule: DamageRule) -> i64 {
        let mut remaining = amount.max(0);
        if rule == DamageRule::ShieldFirst {
            let absorbed = remaining.min(self.shield.max(0));
            self.shield -= absorbed;
            remaining -= absorbed;
        }
        let lost = remaining.min(self.health.max(0));
        self.health = (self.health - remaining).max(0);
        lost
    }

    /// Restore health. Healing may exceed `max_health`.
    pub fn heal(&mut self, amount: i64) {
        self.health += amount.max(0);
    }

    /// Add shield points, or remove them with a negative amount.
    pub fn gain_shield(&mut self, amount: i64) {
        self.shield = (self.shield + amount).max(0);
    }

    /// Check if this participant has lost.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0 || self.decked_out
    }

    /// Pile moves since the last call.
    pub(crate) fn take_moves(&mut self) -> Vec<PileMove> {
        std::mem::take(&mut self.journal)
    }
}
