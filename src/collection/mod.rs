//! Card ownership: the player's collection and booster packs.
//!
//! - `Collection`: owned card copies and unopened packs
//! - `BoosterPack`: pack definition with a card pool and rarity weights

pub mod booster;
pub mod inventory;

pub use booster::{BoosterPack, RarityWeight};
pub use inventory::Collection;
