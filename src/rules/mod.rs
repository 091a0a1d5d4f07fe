//! Duel rules: phases, battle resolution, match results and the turn
//! sequencer.
//!
//! ## Key Types
//!
//! - `Phase`: the turn cycle `Start → Upkeep → Draw → Main → Battle → End`
//! - `resolve`: pure element/level/power/health comparison of two cards
//! - `MatchResult` / `Standing`: how a duel ended, overall and per side
//! - `sequencer`: executes one phase at a time against a `BattleState`

pub mod outcome;
pub mod phase;
pub mod resolver;
pub mod sequencer;

pub use outcome::{MatchResult, Standing};
pub use phase::Phase;
pub use resolver::{resolve, resolve_stats, BattleOutcome, Criterion, ResolverOptions, Verdict};
pub use sequencer::{select_battle_card, step, Controllers, StepOutcome};
