//! Error types.
//!
//! Rule-level conditions (an illegal deck, an empty library) are not errors:
//! they turn into flags, reports and events. The enums here cover
//! configuration mistakes, deck-building requests the rules refuse, and
//! programmer errors in the scripts driving a battle.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{EntityId, Side};
use crate::decks::ValidationReport;
use crate::rules::Phase;
use crate::zones::PileId;

/// Malformed game data, detected while loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("card {0} is defined more than once")]
    DuplicateCard(CardId),
    #[error("ruleset '{0}' is defined more than once")]
    DuplicateRuleset(String),
    #[error("ruleset '{name}' is invalid: {reason}")]
    InvalidRuleset { name: String, reason: String },
    #[error("booster {booster} references unknown card {card}")]
    UnknownBoosterCard { booster: u32, card: CardId },
    #[error("booster {0} has an empty card pool")]
    EmptyBoosterPool(u32),
    #[error("booster {0} is defined more than once")]
    DuplicateBooster(u32),
}

/// Deck-building and collection requests that cannot be carried out.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("no ruleset named '{0}'")]
    UnknownRuleset(String),
    #[error("ruleset '{0}' is locked")]
    LockedRuleset(String),
    #[error("no deck at index {0}")]
    UnknownDeck(usize),
    #[error("card {0} is not in the catalog")]
    UnknownCard(CardId),
    #[error("card {0} is not in the deck")]
    CardNotInDeck(CardId),
    #[error("ruleset '{ruleset}' does not allow another copy of card {card}")]
    RulesetRejects { ruleset: String, card: CardId },
    #[error("no unused copy of card {0} in the collection")]
    NotOwned(CardId),
    #[error("no booster pack with item id {0}")]
    UnknownBooster(u32),
    #[error("need {needed} booster(s) {booster}, own {owned}")]
    BoosterUnavailable { booster: u32, needed: u32, owned: u32 },
    #[error("deck '{name}' is not playable: {report}")]
    Unplayable { name: String, report: ValidationReport },
    #[error("could not set up the battle: {0}")]
    Battle(#[from] BattleError),
    #[error("failed to encode decks: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("failed to convert deck data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Errors raised while driving a battle session.
///
/// These indicate a bug in the calling script, not a game situation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("'{0}' is not a custom pile letter (expected A-Z)")]
    InvalidPileLetter(char),
    #[error("{0} is not part of this battle")]
    UnknownCard(EntityId),
    #[error("{entity} is not in {side}'s {pile}")]
    NotInPile {
        entity: EntityId,
        side: Side,
        pile: PileId,
    },
    #[error("operation requires the {expected} phase, battle is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("{0} already committed a battle card this turn")]
    AlreadySelected(Side),
    #[error("card template {0} is not in the catalog")]
    UnknownTemplate(CardId),
    #[error("the battle session has been closed")]
    SessionClosed,
}
