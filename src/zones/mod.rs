//! Pile system for card locations.
//!
//! ## Key Types
//!
//! - `PileId`: Library, Hand, Discard, Exhaust, or a lettered custom pile
//! - `PileLetter`: Closed A-Z namespace for custom piles
//! - `PileSet`: Card location tracking and movement for one participant
//! - `PilePosition` / `DrawFrom`: Where cards go in and come out

pub mod manager;
pub mod pile;

pub use manager::{DrawFrom, PilePosition, PileSet};
pub use pile::{PileId, PileLetter};
