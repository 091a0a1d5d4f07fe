//! Pile storage for one participant.
//!
//! `PileSet` tracks which pile each card is in and the order of every
//! pile. The location index and the per-pile sequences are updated
//! together, so a card is always in at most one pile: moving a card
//! removes it from its old pile before it is inserted into the new one.
//!
//! ## Cost
//!
//! Looking up a card's pile is O(1). Appending to the top and removing
//! the top card are O(1) amortized. Removing a card from elsewhere, or
//! inserting below the top, shifts the rest of that pile to keep it a
//! contiguous slice, so it costs O(pile size). Piles hold a deck's worth
//! of cards at most.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

use super::pile::PileId;

/// Where to insert a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    /// Top of the pile (end of the sequence). Draws take from here.
    #[default]
    Top,
    /// Bottom of the pile (start of the sequence).
    Bottom,
    /// Specific index from the bottom, clamped to the pile length.
    Index(usize),
}

/// Which end of the library a draw takes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawFrom {
    #[default]
    Top,
    Bottom,
}

/// All piles of one participant.
///
/// ## Usage
///
/// ```
/// use card_duel::core::EntityId;
/// use card_duel::zones::{PileId, PilePosition, PileSet};
///
/// let mut piles = PileSet::new();
/// piles.insert(EntityId(1), PileId::Library, PilePosition::Top);
/// piles.insert(EntityId(2), PileId::Library, PilePosition::Top);
///
/// // Moving is removal-then-insertion.
/// piles.insert(EntityId(2), PileId::Hand, PilePosition::Top);
///
/// assert_eq!(piles.cards(PileId::Library), &[EntityId(1)]);
/// assert_eq!(piles.location(EntityId(2)), Some(PileId::Hand));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileSet {
    /// Card locations: entity_id -> pile.
    locations: FxHashMap<EntityId, PileId>,

    /// Ordered contents, indexed by `PileId::index`. Index 0 is the bottom.
    piles: Vec<Vec<EntityId>>,
}

impl Default for PileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PileSet {
    /// Create an empty set of piles.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locations: FxHashMap::default(),
            piles: vec![Vec::new(); PileId::COUNT],
        }
    }

    /// Put a card into a pile.
    ///
    /// If the card is already in a pile it is removed from there first.
    /// Returns the pile it came from.
    pub fn insert(&mut self, entity: EntityId, pile: PileId, position: PilePosition) -> Option<PileId> {
        let previous = self.remove(entity);

        let order = &mut self.piles[pile.index()];
        match position {
            PilePosition::Top => order.push(entity),
            PilePosition::Bottom => order.insert(0, entity),
            PilePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, entity);
            }
        }
        self.locations.insert(entity, pile);

        previous
    }

    /// Remove a card from whichever pile holds it, keeping the order of
    /// the cards left behind.
    ///
    /// Returns the pile it was in, or `None` if not found.
    pub fn remove(&mut self, entity: EntityId) -> Option<PileId> {
        let pile = self.locations.remove(&entity)?;
        let order = &mut self.piles[pile.index()];
        if let Some(pos) = order.iter().rposition(|&e| e == entity) {
            order.remove(pos);
        }
        Some(pile)
    }

    /// Pile a card is in.
    #[must_use]
    pub fn location(&self, entity: EntityId) -> Option<PileId> {
        self.locations.get(&entity).copied()
    }

    /// Check if a card is in a specific pile.
    #[must_use]
    pub fn is_in(&self, entity: EntityId, pile: PileId) -> bool {
        self.location(entity) == Some(pile)
    }

    /// Cards in a pile, bottom to top.
    #[must_use]
    pub fn cards(&self, pile: PileId) -> &[EntityId] {
        &self.piles[pile.index()]
    }

    /// Number of cards in a pile.
    #[must_use]
    pub fn size(&self, pile: PileId) -> usize {
        self.piles[pile.index()].len()
    }

    /// Top card of a pile.
    #[must_use]
    pub fn top(&self, pile: PileId) -> Option<EntityId> {
        self.piles[pile.index()].last().copied()
    }

    /// Take the card at one end of a pile and put it on top of another.
    ///
    /// Returns the moved card, or `None` if the source pile is empty.
    pub fn transfer_one(&mut self, from: PileId, to: PileId, end: DrawFrom) -> Option<EntityId> {
        let order = &self.piles[from.index()];
        let entity = match end {
            DrawFrom::Top => order.last().copied(),
            DrawFrom::Bottom => order.first().copied(),
        }?;
        self.insert(entity, to, PilePosition::Top);
        Some(entity)
    }

    /// Move every card of `from` onto the top of `to`, keeping their order.
    ///
    /// Returns the moved cards.
    pub fn transfer_all(&mut self, from: PileId, to: PileId) -> Vec<EntityId> {
        if from == to {
            return Vec::new();
        }
        let moved = std::mem::take(&mut self.piles[from.index()]);
        for &entity in &moved {
            self.locations.insert(entity, to);
        }
        self.piles[to.index()].extend_from_slice(&moved);
        moved
    }

    /// Shuffle a pile in place.
    pub fn shuffle(&mut self, pile: PileId, rng: &mut GameRng) {
        rng.shuffle(&mut self.piles[pile.index()]);
    }

    /// Total number of cards across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Check if any pile holds the card.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }

    /// Verify the location index agrees with the pile contents and that
    /// no card appears twice.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0usize;
        for pile in PileId::all() {
            for entity in self.cards(pile) {
                if self.location(*entity) != Some(pile) {
                    return false;
                }
                seen += 1;
            }
        }
        seen == self.locations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_positions() {
        let mut piles = PileSet::new();
        let library = PileId::Library;

        // 10 to top, 11 to bottom, 12 to top
        piles.insert(EntityId(10), library, PilePosition::Top);
        piles.insert(EntityId(11), library, PilePosition::Bottom);
        piles.insert(EntityId(12), library, PilePosition::Top);

        assert_eq!(piles.cards(library), &[EntityId(11), EntityId(10), EntityId(12)]);

        piles.insert(EntityId(13), library, PilePosition::Index(1));
        assert_eq!(
            piles.cards(library),
            &[EntityId(11), EntityId(13), EntityId(10), EntityId(12)]
        );

        piles.insert(EntityId(14), library, PilePosition::Index(99));
        assert_eq!(piles.top(library), Some(EntityId(14)));
    }

    #[test]
    fn test_insert_existing_moves() {
        let mut piles = PileSet::new();

        piles.insert(EntityId(1), PileId::Hand, PilePosition::Top);
        let previous = piles.insert(EntityId(1), PileId::Discard, PilePosition::Top);

        assert_eq!(previous, Some(PileId::Hand));
        assert_eq!(piles.size(PileId::Hand), 0);
        assert_eq!(piles.cards(PileId::Discard), &[EntityId(1)]);
        assert_eq!(piles.total_cards(), 1);
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_reinsert_same_pile_does_not_duplicate() {
        let mut piles = PileSet::new();

        piles.insert(EntityId(1), PileId::Hand, PilePosition::Top);
        piles.insert(EntityId(2), PileId::Hand, PilePosition::Top);
        piles.insert(EntityId(1), PileId::Hand, PilePosition::Top);

        assert_eq!(piles.cards(PileId::Hand), &[EntityId(2), EntityId(1)]);
    }

    #[test]
    fn test_remove() {
        let mut piles = PileSet::new();
        piles.insert(EntityId(10), PileId::Exhaust, PilePosition::Top);

        assert_eq!(piles.remove(EntityId(10)), Some(PileId::Exhaust));
        assert_eq!(piles.remove(EntityId(10)), None);
        assert!(!piles.contains(EntityId(10)));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut piles = PileSet::new();
        for i in 0..5 {
            piles.insert(EntityId(i), PileId::Hand, PilePosition::Top);
        }

        assert_eq!(piles.remove(EntityId(4)), Some(PileId::Hand));
        assert_eq!(piles.remove(EntityId(1)), Some(PileId::Hand));

        assert_eq!(piles.cards(PileId::Hand), &[EntityId(0), EntityId(2), EntityId(3)]);
        assert_eq!(piles.top(PileId::Hand), Some(EntityId(3)));
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_transfer_one_ends() {
        let mut piles = PileSet::new();
        for i in 0..3 {
            piles.insert(EntityId(i), PileId::Library, PilePosition::Top);
        }

        assert_eq!(piles.transfer_one(PileId::Library, PileId::Hand, DrawFrom::Top), Some(EntityId(2)));
        assert_eq!(piles.transfer_one(PileId::Library, PileId::Hand, DrawFrom::Bottom), Some(EntityId(0)));
        assert_eq!(piles.transfer_one(PileId::Library, PileId::Hand, DrawFrom::Top), Some(EntityId(1)));
        assert_eq!(piles.transfer_one(PileId::Library, PileId::Hand, DrawFrom::Top), None);
        assert_eq!(piles.size(PileId::Hand), 3);
    }

    #[test]
    fn test_transfer_all() {
        let mut piles = PileSet::new();
        piles.insert(EntityId(1), PileId::Library, PilePosition::Top);
        piles.insert(EntityId(2), PileId::Discard, PilePosition::Top);
        piles.insert(EntityId(3), PileId::Discard, PilePosition::Top);

        let moved = piles.transfer_all(PileId::Discard, PileId::Library);

        assert_eq!(moved, vec![EntityId(2), EntityId(3)]);
        assert_eq!(piles.cards(PileId::Library), &[EntityId(1), EntityId(2), EntityId(3)]);
        assert_eq!(piles.size(PileId::Discard), 0);
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_shuffle() {
        let mut piles = PileSet::new();
        for i in 0..20 {
            piles.insert(EntityId(i), PileId::Library, PilePosition::Top);
        }
        let before = piles.cards(PileId::Library).to_vec();

        let mut rng = GameRng::new(42);
        piles.shuffle(PileId::Library, &mut rng);

        let after = piles.cards(PileId::Library).to_vec();
        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_custom_piles_are_independent() {
        let mut piles = PileSet::new();
        let a = PileId::custom('A').unwrap();
        let z = PileId::custom('Z').unwrap();

        piles.insert(EntityId(1), a, PilePosition::Top);
        piles.insert(EntityId(2), z, PilePosition::Top);

        assert_eq!(piles.cards(a), &[EntityId(1)]);
        assert_eq!(piles.cards(z), &[EntityId(2)]);
    }
}
