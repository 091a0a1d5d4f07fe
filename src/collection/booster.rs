//! Booster pack definitions and opening.
//!
//! Opening a pack picks each card in two steps: a rarity by weight, then a
//! uniformly random card of that rarity from the pack's pool. When the
//! pool has no card of the drawn rarity the pick falls back to the whole
//! pool, so a pack always yields `cards_per_pack` cards.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId};
use crate::core::GameRng;
use crate::error::ConfigError;

/// Relative chance of drawing a rarity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RarityWeight {
    pub rarity: u8,
    pub weight: f32,
}

/// A booster pack item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoosterPack {
    /// Item id of the pack itself.
    pub id: u32,

    pub name: String,

    #[serde(default = "default_cards_per_pack")]
    pub cards_per_pack: usize,

    pub pool: Vec<CardId>,

    /// Empty means every pool card is equally likely.
    #[serde(default)]
    pub rarity_weights: Vec<RarityWeight>,
}

fn default_cards_per_pack() -> usize {
    5
}

impl BoosterPack {
    pub fn new(id: u32, name: impl Into<String>, pool: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            id,
            name: name.into(),
            cards_per_pack: default_cards_per_pack(),
            pool: pool.into_iter().collect(),
            rarity_weights: Vec::new(),
        }
    }

    /// Set the pack size (builder pattern).
    #[must_use]
    pub fn with_cards_per_pack(mut self, count: usize) -> Self {
        self.cards_per_pack = count;
        self
    }

    /// Add a rarity weight (builder pattern).
    #[must_use]
    pub fn with_rarity_weight(mut self, rarity: u8, weight: f32) -> Self {
        self.rarity_weights.push(RarityWeight { rarity, weight });
        self
    }

    /// Reject packs that could never be opened.
    pub fn check(&self, catalog: &(impl CardCatalog + ?Sized)) -> Result<(), ConfigError> {
        if self.pool.is_empty() {
            return Err(ConfigError::EmptyBoosterPool(self.id));
        }
        if let Some(&card) = self.pool.iter().find(|&&c| !catalog.contains(c)) {
            return Err(ConfigError::UnknownBoosterCard { booster: self.id, card });
        }
        if self.cards_per_pack == 0 {
            tracing::warn!(booster = self.id, "booster pack yields no cards");
        }
        Ok(())
    }

    /// Open one pack.
    pub fn open(&self, catalog: &(impl CardCatalog + ?Sized), rng: &mut GameRng) -> Vec<CardId> {
        (0..self.cards_per_pack)
            .filter_map(|_| self.pick(catalog, rng))
            .collect()
    }

    fn pick(&self, catalog: &(impl CardCatalog + ?Sized), rng: &mut GameRng) -> Option<CardId> {
        let weights: Vec<f32> = self.rarity_weights.iter().map(|w| w.weight).collect();
        if let Some(index) = rng.choose_weighted(&weights) {
            let rarity = self.rarity_weights[index].rarity;
            let candidates: Vec<CardId> = self
                .pool
                .iter()
                .copied()
                .filter(|&c| catalog.template(c).is_some_and(|t| t.rarity == rarity))
                .collect();
            if let Some(&card) = rng.choose(&candidates) {
                return Some(card);
            }
        }
        rng.choose(&self.pool).copied()
    }
}
