//! The view of a battle an effect runs against.

use super::registry::EffectTrigger;
use crate::cards::{Card, CardStats};
use crate::core::{BattleState, EntityId, Side};
use crate::error::BattleError;
use crate::zones::PileId;

/// Battle state plus the card whose effect is running.
///
/// "Self" and "opponent" are relative to the source card's owner at the
/// moment the effect fired.
pub struct EffectContext<'a> {
    state: &'a mut BattleState,
    source: EntityId,
    side: Side,
    trigger: EffectTrigger,
}

impl<'a> EffectContext<'a> {
    /// Context for `source` firing `trigger`.
    pub fn new(state: &'a mut BattleState, source: EntityId, trigger: EffectTrigger) -> Result<Self, BattleError> {
        let side = state.card(source).ok_or(BattleError::UnknownCard(source))?.owner;
        Ok(Self {
            state,
            source,
            side,
            trigger,
        })
    }

    #[must_use]
    pub fn source(&self) -> EntityId {
        self.source
    }

    /// Side that owns the source card.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn trigger(&self) -> EffectTrigger {
        self.trigger
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &*self.state
    }

    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut *self.state
    }

    #[must_use]
    pub fn source_card(&self) -> Option<&Card> {
        self.state.card(self.source)
    }

    /// The other side's committed battle card.
    #[must_use]
    pub fn opposing_card(&self) -> Option<&Card> {
        self.state
            .participant(self.side.other())
            .battle_card
            .and_then(|entity| self.state.card(entity))
    }

    /// Returns the health the opponent lost.
    pub fn damage_opponent(&mut self, amount: i64) -> i64 {
        self.state.damage(self.side.other(), amount)
    }

    pub fn damage_self(&mut self, amount: i64) -> i64 {
        self.state.damage(self.side, amount)
    }

    pub fn heal(&mut self, amount: i64) {
        self.state.heal(self.side, amount);
    }

    pub fn gain_shield(&mut self, amount: i64) {
        self.state.gain_shield(self.side, amount);
    }

    /// Draw for the source card's owner. Returns the number drawn.
    pub fn draw(&mut self, count: usize) -> usize {
        self.state.draw(self.side, count)
    }

    pub fn modify_source(&mut self, delta: CardStats) -> Result<(), BattleError> {
        self.state
            .card_mut(self.source)
            .ok_or(BattleError::UnknownCard(self.source))?
            .modify_stats(delta);
        Ok(())
    }

    /// Change the opposing battle card. Returns false when there is none.
    pub fn modify_opposing(&mut self, delta: CardStats) -> bool {
        let Some(entity) = self.state.participant(self.side.other()).battle_card else {
            return false;
        };
        match self.state.card_mut(entity) {
            Some(card) => {
                card.modify_stats(delta);
                true
            }
            None => false,
        }
    }

    pub fn exhaust_after_battle(&mut self) {
        self.state.route_to_exhaust(self.source);
    }

    /// Move the source card to one of its owner's piles.
    pub fn move_source_to(&mut self, pile: PileId, at_bottom: bool) -> Result<(), BattleError> {
        self.state.add_card_to(self.side, pile, self.source, at_bottom)?;
        Ok(())
    }
}
