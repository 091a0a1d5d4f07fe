//! Battle events.
//!
//! State changes are buffered as `BattleEvent`s inside the `BattleState`
//! and delivered to observers once the operation that caused them has
//! finished. Logical state is final before any observer sees an event.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::side::Side;
use crate::cards::CardId;
use crate::rules::{BattleOutcome, MatchResult, Phase};
use crate::zones::PileId;

/// A card changing piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMove {
    /// Participant whose piles the card moved within.
    pub side: Side,
    pub entity: EntityId,
    pub card_id: CardId,
    pub from: Option<PileId>,
    pub to: Option<PileId>,
}

/// One resolved battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub turn: u32,
    pub player_card: Option<CardId>,
    pub opponent_card: Option<CardId>,
    /// Outcome from the player's perspective.
    pub outcome: BattleOutcome,
}

impl BattleReport {
    /// Outcome from `side`'s perspective.
    #[must_use]
    pub fn outcome_for(&self, side: Side) -> BattleOutcome {
        match side {
            Side::Player => self.outcome,
            Side::Opponent => self.outcome.flipped(),
        }
    }
}

/// Something observers may want to animate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    PhaseChanged { phase: Phase, turn: u32 },
    CardMoved(CardMove),
    BattleResolved(BattleReport),
    MatchFinished(MatchResult),
}
