//! Core duel types: entities, sides, participants, state, events, RNG,
//! configuration.
//!
//! Everything a duel mutates lives in `BattleState`, which is owned by a
//! `BattleSession`. House rules are data in `BattleConfig` rather than
//! code paths.

pub mod config;
pub mod entity;
pub mod event;
pub mod participant;
pub mod rng;
pub mod side;
pub mod state;

pub use config::{BattleConfig, DamageRule, EmptyLibraryRule};
pub use entity::{EntityAllocator, EntityId};
pub use event::{BattleEvent, BattleReport, CardMove};
pub use participant::{Participant, PileMove};
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SideMap};
pub use state::BattleState;
