//! The player's owned cards and unopened booster packs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Owned card copies and booster packs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    cards: FxHashMap<CardId, u32>,
    boosters: FxHashMap<u32, u32>,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of a card owned.
    #[must_use]
    pub fn owned(&self, card: CardId) -> u32 {
        self.cards.get(&card).copied().unwrap_or(0)
    }

    /// Add copies of a card.
    pub fn add_card(&mut self, card: CardId, copies: u32) {
        *self.cards.entry(card).or_insert(0) += copies;
    }

    /// Remove copies of a card. Returns how many were actually removed.
    pub fn remove_card(&mut self, card: CardId, copies: u32) -> u32 {
        let Some(owned) = self.cards.get_mut(&card) else {
            return 0;
        };
        let removed = copies.min(*owned);
        *owned -= removed;
        if *owned == 0 {
            self.cards.remove(&card);
        }
        removed
    }

    /// Unopened packs of a booster owned.
    #[must_use]
    pub fn boosters(&self, booster: u32) -> u32 {
        self.boosters.get(&booster).copied().unwrap_or(0)
    }

    pub fn add_boosters(&mut self, booster: u32, count: u32) {
        *self.boosters.entry(booster).or_insert(0) += count;
    }

    /// Spend `count` packs. Fails without change if too few are owned.
    pub fn take_boosters(&mut self, booster: u32, count: u32) -> bool {
        let owned = self.boosters(booster);
        if owned < count {
            return false;
        }
        if owned == count {
            self.boosters.remove(&booster);
        } else {
            self.boosters.insert(booster, owned - count);
        }
        true
    }

    /// Distinct owned cards in id order with their counts.
    #[must_use]
    pub fn cards(&self) -> Vec<(CardId, u32)> {
        let mut cards: Vec<_> = self.cards.iter().map(|(&c, &n)| (c, n)).collect();
        cards.sort_unstable();
        cards
    }

    /// Total owned card copies.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.cards.values().sum()
    }
}
