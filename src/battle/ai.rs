//! Battle-card selection for computer-controlled participants.
//!
//! Selection is trait-based so scripted opponents can plug in their own
//! logic:
//! - `BattleAi`: picks one card from the hand each Main phase
//! - `AiBehavior`: the built-in behaviours, selectable by tag in game data

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{EntityId, GameRng, Participant, Side};
use crate::rules::{resolve_stats, ResolverOptions, Verdict};

/// What an AI may see when choosing a battle card.
#[derive(Debug)]
pub struct SelectionView<'a> {
    pub side: Side,
    pub turn: u32,
    /// Hand cards, bottom to top.
    pub hand: Vec<&'a Card>,
    /// The other side's committed card. Only present for AIs that wait
    /// for the player.
    pub opposing_card: Option<&'a Card>,
    pub own: &'a Participant,
    pub other: &'a Participant,
    pub options: ResolverOptions,
}

/// Picks battle cards for one side.
pub trait BattleAi {
    /// Commit only after the other side has committed, and see its card.
    fn waits_for_player(&self) -> bool {
        false
    }

    /// Choose a card from `view.hand`. `None` commits nothing.
    fn choose_card(&mut self, view: &SelectionView<'_>, rng: &mut GameRng) -> Option<EntityId>;
}

/// Built-in AI behaviours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Any card, uniformly.
    #[default]
    Random,
    /// Highest level, then power, then health.
    Strongest,
    /// Lowest level, then power, then health.
    Weakest,
    /// Waits for the player's card and answers it with the cheapest card
    /// that wins, or the cheapest card at all when nothing wins.
    Counter,
}

fn strength(card: &Card) -> (i64, i64, i64) {
    (card.stats.level, card.stats.power, card.stats.health)
}

/// First strongest card in hand order.
fn strongest(hand: &[&Card]) -> Option<EntityId> {
    hand.iter()
        .enumerate()
        .max_by_key(|(i, card)| (strength(card), Reverse(*i)))
        .map(|(_, card)| card.entity)
}

/// First weakest card in hand order.
fn weakest(hand: &[&Card]) -> Option<EntityId> {
    hand.iter()
        .enumerate()
        .min_by_key(|(i, card)| (strength(card), *i))
        .map(|(_, card)| card.entity)
}

fn verdict_rank(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Win => 3,
        Verdict::Tie => 2,
        Verdict::MutualLoss => 1,
        Verdict::Lose => 0,
    }
}

impl BattleAi for AiBehavior {
    fn waits_for_player(&self) -> bool {
        matches!(self, AiBehavior::Counter)
    }

    fn choose_card(&mut self, view: &SelectionView<'_>, rng: &mut GameRng) -> Option<EntityId> {
        match self {
            AiBehavior::Random => rng.choose(&view.hand).map(|card| card.entity),
            AiBehavior::Strongest => strongest(&view.hand),
            AiBehavior::Weakest => weakest(&view.hand),
            AiBehavior::Counter => {
                let Some(target) = view.opposing_card else {
                    return strongest(&view.hand);
                };
                view.hand
                    .iter()
                    .enumerate()
                    .max_by_key(|(i, card)| {
                        let outcome =
                            resolve_stats(card.element, card.stats, target.element, target.stats, &view.options);
                        (verdict_rank(outcome.verdict), Reverse(strength(card)), Reverse(*i))
                    })
                    .map(|(_, card)| card.entity)
            }
        }
    }
}
