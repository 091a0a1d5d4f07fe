//! # card-duel
//!
//! Rule core for a collectible card duel: two participants, element-based
//! battles, deck rulesets and a fixed turn cycle.
//!
//! ## Design Principles
//!
//! 1. **Explicit Context**: a duel lives entirely in its `BattleSession`.
//!    There is no global battle state, so sessions never interfere.
//!
//! 2. **Data-Driven Cards**: cards, rulesets, boosters and most card
//!    effects load from JSON. Custom behaviour plugs into the
//!    `(CardId, EffectTrigger)` effect registry.
//!
//! 3. **Presentation Is a Listener**: the rules decide, observers animate.
//!    Waiting for an animation is a frame-scheduled task, never a block.
//!
//! ## Architecture
//!
//! - **Battle Resolution**: element cycle first, then level, then power,
//!   then (optionally) health.
//!
//! - **Turn Cycle**: Start, then Upkeep, Draw, Main, Battle, End per turn,
//!   until a side reaches zero health or decks out.
//!
//! - **Persistent Data Structures**: battle history uses `im-rs` so a
//!   state snapshot is cheap.
//!
//! ## Modules
//!
//! - `core`: entity ids, sides, RNG, configuration, participants, state
//! - `zones`: piles (Library, Hand, Discard, Exhaust, custom A-Z)
//! - `cards`: card templates, instances, elements, the catalog
//! - `decks`: decks, rulesets, validation, deck storage
//! - `collection`: owned cards and booster packs
//! - `rules`: resolver, phases and the turn sequencer
//! - `effects`: card effect registry
//! - `battle`: sessions, AI, observers, frame scheduler
//! - `games`: the duel game surface

pub mod core;
pub mod zones;
pub mod cards;
pub mod decks;
pub mod collection;
pub mod rules;
pub mod effects;
pub mod battle;
pub mod games;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, DamageRule, EmptyLibraryRule,
    EntityId, Side, SideMap,
    GameRng, GameRngState,
    BattleEvent, BattleReport, CardMove,
    Participant, BattleState,
};

pub use crate::zones::{PileId, PileLetter, PileSet, DrawFrom, PilePosition};

pub use crate::cards::{
    CardId, CardStats, CardTemplate, Card,
    Element, ElementMatchup,
    CardCatalog, CardRegistry,
};

pub use crate::decks::{
    Deck, DeckStats, DeckStorage,
    CardFilter, CopyRestriction, Ruleset, UnlockCondition,
    validate, ValidationReport, Violation,
};

pub use crate::collection::{BoosterPack, Collection};

pub use crate::rules::{
    resolve, BattleOutcome, Criterion, Verdict,
    MatchResult, Standing, Phase, StepOutcome,
};

pub use crate::effects::{CardEffect, Effect, EffectContext, EffectRegistry, EffectTrigger};

pub use crate::battle::{AiBehavior, BattleAi, BattleObserver, BattleSession, FrameScheduler};

pub use crate::games::duel::{DuelGame, DuelGameBuilder, GameData};

pub use crate::error::{BattleError, ConfigError, DeckError};
