//! Effect registry.
//!
//! Card behaviour is looked up by `(CardId, EffectTrigger)`. The registry
//! is built once per game and shared by every battle session, so effects
//! never hold per-battle state of their own.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::context::EffectContext;
use super::effect::{CardEffect, Effect, FnEffect};
use crate::cards::CardId;
use crate::core::{BattleState, EntityId};
use crate::error::BattleError;

/// When a card's effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// Upkeep phase, for cards in hand.
    Upkeep,
    /// Battle card turned face-up, before resolution.
    Reveal,
    /// Battle card won.
    Win,
    /// Battle card lost, including a double K.O.
    Lose,
    /// After any battle the card fought in.
    AfterBattle,
    /// End phase, for cards in hand.
    EndOfTurn,
}

impl std::fmt::Display for EffectTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EffectTrigger::Upkeep => "upkeep",
            EffectTrigger::Reveal => "reveal",
            EffectTrigger::Win => "win",
            EffectTrigger::Lose => "lose",
            EffectTrigger::AfterBattle => "after battle",
            EffectTrigger::EndOfTurn => "end of turn",
        };
        f.write_str(name)
    }
}

/// A data-defined effect attached to a card, as found in game data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBinding {
    pub card: CardId,
    pub trigger: EffectTrigger,
    pub effect: Effect,
}

/// Effects indexed by card and trigger.
#[derive(Default)]
pub struct EffectRegistry {
    effects: FxHashMap<(CardId, EffectTrigger), Vec<Box<dyn CardEffect>>>,
}

impl EffectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an effect. Several effects on the same key fire in
    /// registration order.
    pub fn register(&mut self, card: CardId, trigger: EffectTrigger, effect: impl CardEffect + 'static) {
        self.effects.entry((card, trigger)).or_default().push(Box::new(effect));
    }

    /// Attach a closure.
    pub fn register_fn<F>(&mut self, card: CardId, trigger: EffectTrigger, f: F)
    where
        F: Fn(&mut EffectContext<'_>) -> Result<(), BattleError> + 'static,
    {
        self.register(card, trigger, FnEffect(f));
    }

    /// Attach an effect (builder pattern).
    #[must_use]
    pub fn with(mut self, card: CardId, trigger: EffectTrigger, effect: impl CardEffect + 'static) -> Self {
        self.register(card, trigger, effect);
        self
    }

    /// Attach every data-defined binding.
    pub fn register_bindings(&mut self, bindings: impl IntoIterator<Item = EffectBinding>) {
        for binding in bindings {
            self.register(binding.card, binding.trigger, binding.effect);
        }
    }

    /// Effects for a key, in registration order.
    #[must_use]
    pub fn effects_for(&self, card: CardId, trigger: EffectTrigger) -> &[Box<dyn CardEffect>] {
        self.effects.get(&(card, trigger)).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn has(&self, card: CardId, trigger: EffectTrigger) -> bool {
        !self.effects_for(card, trigger).is_empty()
    }

    /// Number of registered effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Run the effects of a card instance for a trigger. Returns how many
    /// ran.
    pub fn fire(&self, state: &mut BattleState, entity: EntityId, trigger: EffectTrigger) -> Result<usize, BattleError> {
        let card_id = state.card(entity).ok_or(BattleError::UnknownCard(entity))?.card_id;
        let effects = self.effects_for(card_id, trigger);
        if effects.is_empty() {
            return Ok(0);
        }

        tracing::debug!(card = %card_id, %entity, %trigger, count = effects.len(), "card effects");
        let mut ctx = EffectContext::new(state, entity, trigger)?;
        for effect in effects {
            effect.apply(&mut ctx)?;
        }
        Ok(effects.len())
    }
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRegistry").field("effects", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRegistry, CardStats, CardTemplate};
    use crate::core::{BattleConfig, Side};
    use crate::zones::PileId;

    fn state() -> (BattleState, EntityId) {
        let catalog =
            CardRegistry::from_templates([CardTemplate::new(CardId::new(1), "Imp").with_stats(1, 1, 1)]).unwrap();
        let mut state = BattleState::new(BattleConfig::default(), 3);
        state.load_deck(Side::Player, "Deck", &[CardId::new(1)], &catalog).unwrap();
        state.draw(Side::Player, 1);
        let entity = state.participant(Side::Player).hand()[0];
        (state, entity)
    }

    #[test]
    fn test_fire_data_effects_in_order() {
        let (mut state, entity) = state();
        let registry = EffectRegistry::new()
            .with(CardId::new(1), EffectTrigger::Upkeep, Effect::damage(3))
            .with(CardId::new(1), EffectTrigger::Upkeep, Effect::buff(0, 2, 0));

        let fired = registry.fire(&mut state, entity, EffectTrigger::Upkeep).unwrap();

        assert_eq!(fired, 2);
        assert_eq!(state.participant(Side::Opponent).health, 17);
        assert_eq!(state.card(entity).unwrap().stats, CardStats::new(1, 3, 1));
        assert_eq!(registry.fire(&mut state, entity, EffectTrigger::Win).unwrap(), 0);
    }

    #[test]
    fn test_closure_effect() {
        let (mut state, entity) = state();
        let mut registry = EffectRegistry::new();
        registry.register_fn(CardId::new(1), EffectTrigger::EndOfTurn, |ctx| {
            let lost = ctx.damage_self(2);
            ctx.gain_shield(lost);
            ctx.move_source_to(PileId::custom('A')?, false)
        });

        registry.fire(&mut state, entity, EffectTrigger::EndOfTurn).unwrap();

        let player = state.participant(Side::Player);
        assert_eq!((player.health, player.shield), (18, 2));
        assert_eq!(player.custom_pile('A').unwrap(), &[entity]);
        assert!(registry.has(CardId::new(1), EffectTrigger::EndOfTurn));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_bindings() {
        let json = r#"[{"card": 1, "trigger": "Win", "effect": {"Heal": 4}}]"#;
        let bindings: Vec<EffectBinding> = serde_json::from_str(json).unwrap();
        let mut registry = EffectRegistry::new();
        registry.register_bindings(bindings);

        assert!(registry.has(CardId::new(1), EffectTrigger::Win));
        assert!(!registry.has(CardId::new(1), EffectTrigger::Lose));
    }
}
