//! Card effects.
//!
//! Per-card behaviour is registered, not scripted:
//! - `CardEffect`: strategy interface applied against an `EffectContext`
//! - `Effect`: built-in data-defined effects
//! - `EffectRegistry`: effects keyed by `(CardId, EffectTrigger)`
//!
//! The sequencer fires triggers; effects never reach into the sequencer
//! themselves.

pub mod context;
pub mod effect;
pub mod registry;

pub use context::EffectContext;
pub use effect::{CardEffect, Effect, FnEffect};
pub use registry::{EffectBinding, EffectRegistry, EffectTrigger};
