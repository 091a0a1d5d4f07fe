//! The duel game: data loading and the script-call surface.
//!
//! `GameData` describes the cards, rulesets, boosters, battle rules and
//! data-defined effects. `DuelGameBuilder` turns it into a `DuelGame`,
//! which owns the player's collection and decks and sets up battles.

mod data;
mod game;

pub use data::GameData;
pub use game::{DuelGame, DuelGameBuilder};
