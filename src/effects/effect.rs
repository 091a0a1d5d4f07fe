//! Card effect definitions.
//!
//! `CardEffect` is the strategy interface every card behaviour implements.
//! Most cards need nothing more than the built-in `Effect` values, which
//! are plain data and load from JSON. Anything else can be written as a
//! closure and registered with `EffectRegistry::register_fn`.

use serde::{Deserialize, Serialize};

use super::context::EffectContext;
use crate::cards::CardStats;
use crate::error::BattleError;
use crate::zones::PileId;

/// Behaviour attached to a card for one trigger.
pub trait CardEffect {
    /// Apply the effect. `ctx` knows the card that triggered it.
    fn apply(&self, ctx: &mut EffectContext<'_>) -> Result<(), BattleError>;
}

/// An atomic card effect.
///
/// ## Participant effects
///
/// - `DamageOpponent` / `DamageSelf`: damage under the configured
///   damage rule
/// - `Heal`, `GainShield`
/// - `Draw`: draw for the card's owner
///
/// ## Card effects
///
/// - `ModifyStats`: buff or debuff the card itself
/// - `ModifyOpposing`: buff or debuff the other side's battle card
/// - `ExhaustAfterBattle`: send the card to Exhaust instead of Discard
/// - `MoveTo`: move the card to one of its owner's piles
///
/// ## Composite
///
/// - `Batch`: apply several effects in order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    DamageOpponent(i64),
    DamageSelf(i64),
    Heal(i64),
    GainShield(i64),
    Draw(usize),
    ModifyStats(CardStats),
    ModifyOpposing(CardStats),
    ExhaustAfterBattle,
    MoveTo { pile: PileId, at_bottom: bool },
    Batch(Vec<Effect>),
}

impl Effect {
    /// Damage the opposing participant.
    pub fn damage(amount: i64) -> Self {
        Self::DamageOpponent(amount)
    }

    pub fn heal(amount: i64) -> Self {
        Self::Heal(amount)
    }

    pub fn draw(count: usize) -> Self {
        Self::Draw(count)
    }

    /// Change the card's own level, power and health.
    pub fn buff(level: i64, power: i64, health: i64) -> Self {
        Self::ModifyStats(CardStats::new(level, power, health))
    }

    /// Move the card to the top of a pile.
    pub fn move_to(pile: PileId) -> Self {
        Self::MoveTo { pile, at_bottom: false }
    }

    /// Create a batch of effects.
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Self {
        Self::Batch(effects.into_iter().collect())
    }
}

impl CardEffect for Effect {
    fn apply(&self, ctx: &mut EffectContext<'_>) -> Result<(), BattleError> {
        match self {
            Effect::DamageOpponent(amount) => {
                ctx.damage_opponent(*amount);
            }
            Effect::DamageSelf(amount) => {
                ctx.damage_self(*amount);
            }
            Effect::Heal(amount) => ctx.heal(*amount),
            Effect::GainShield(amount) => ctx.gain_shield(*amount),
            Effect::Draw(count) => {
                ctx.draw(*count);
            }
            Effect::ModifyStats(delta) => ctx.modify_source(*delta)?,
            Effect::ModifyOpposing(delta) => {
                ctx.modify_opposing(*delta);
            }
            Effect::ExhaustAfterBattle => ctx.exhaust_after_battle(),
            Effect::MoveTo { pile, at_bottom } => ctx.move_source_to(*pile, *at_bottom)?,
            Effect::Batch(effects) => {
                for effect in effects {
                    effect.apply(ctx)?;
                }
            }
        }
        Ok(())
    }
}

/// Adapter that lets a closure act as a `CardEffect`.
pub struct FnEffect<F>(pub F);

impl<F> CardEffect for FnEffect<F>
where
    F: Fn(&mut EffectContext<'_>) -> Result<(), BattleError>,
{
    fn apply(&self, ctx: &mut EffectContext<'_>) -> Result<(), BattleError> {
        (self.0)(ctx)
    }
}
