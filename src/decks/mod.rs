//! Deck building: rulesets, decks, validation and saved-deck storage.
//!
//! ## Key Types
//!
//! - `Ruleset`: size bounds, copy limits, filters and unlock condition
//! - `Deck`: named card list with cosmetics and a battle record
//! - `validate`: pure legality check producing a `ValidationReport`
//! - `DeckStorage`: the player's saved decks with bound-checked editing

pub mod deck;
pub mod ruleset;
pub mod storage;
pub mod validator;

pub use deck::{deserialize, serialize, Deck, DeckStats};
pub use ruleset::{CardFilter, CopyRestriction, Ruleset, UnlockCondition, UnlockProgress};
pub use storage::DeckStorage;
pub use validator::{validate, ValidationReport, Violation};
