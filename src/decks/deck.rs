//! Player decks and their persisted form.
//!
//! The save-data schema is stable:
//!
//! ```json
//! {"name": "Blaze", "rulesetName": "Standard", "cards": [1, 1, 4],
//!  "box": "red", "sleeves": "flame", "favorite": false,
//!  "stats": {"played": 3, "won": 2, "lost": 1, "tied": 0}}
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::error::DeckError;
use crate::rules::Standing;

/// Battle record of a deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
}

impl DeckStats {
    /// Record one finished battle. Draws count as ties.
    pub fn record(&mut self, standing: Standing) {
        self.played += 1;
        match standing {
            Standing::Win => self.won += 1,
            Standing::Lose => self.lost += 1,
            Standing::Tie | Standing::Draw => self.tied += 1,
        }
    }
}

/// A named, ordered list of card ids built under a ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub name: String,

    pub ruleset_name: String,

    /// Card ids in deck order; repeated ids are copies.
    pub cards: Vec<CardId>,

    #[serde(rename = "box", default)]
    pub box_style: String,

    #[serde(default)]
    pub sleeves: String,

    #[serde(default)]
    pub favorite: bool,

    #[serde(default)]
    pub stats: DeckStats,

    /// Result of the last validation. Recomputed after loading.
    #[serde(skip, default = "playable_default")]
    pub playable: bool,
}

fn playable_default() -> bool {
    true
}

impl Deck {
    /// Create an empty deck.
    pub fn new(name: impl Into<String>, ruleset_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ruleset_name: ruleset_name.into(),
            cards: Vec::new(),
            box_style: String::new(),
            sleeves: String::new(),
            favorite: false,
            stats: DeckStats::default(),
            playable: true,
        }
    }

    /// Add cards in order (builder pattern).
    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// Add `copies` copies of a card (builder pattern).
    #[must_use]
    pub fn with_copies(mut self, card: CardId, copies: usize) -> Self {
        self.cards.extend(std::iter::repeat(card).take(copies));
        self
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of copies of a card.
    #[must_use]
    pub fn count_of(&self, card: CardId) -> u32 {
        self.cards.iter().filter(|&&c| c == card).count() as u32
    }

    /// Copy counts per distinct card, in first-appearance order.
    #[must_use]
    pub fn card_counts(&self) -> Vec<(CardId, u32)> {
        let mut index: FxHashMap<CardId, usize> = FxHashMap::default();
        let mut counts: Vec<(CardId, u32)> = Vec::new();
        for &card in &self.cards {
            match index.get(&card) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(card, counts.len());
                    counts.push((card, 1));
                }
            }
        }
        counts
    }

    /// Append one copy of a card. Ruleset bounds are enforced by
    /// `DeckStorage`, which knows the ruleset.
    pub fn push(&mut self, card: CardId) {
        self.cards.push(card);
    }

    /// Remove the last copy of a card.
    pub fn remove(&mut self, card: CardId) -> Result<(), DeckError> {
        let pos = self
            .cards
            .iter()
            .rposition(|&c| c == card)
            .ok_or(DeckError::CardNotInDeck(card))?;
        self.cards.remove(pos);
        Ok(())
    }
}

/// Convert a deck to plain save data.
pub fn serialize(deck: &Deck) -> Result<serde_json::Value, DeckError> {
    Ok(serde_json::to_value(deck)?)
}

/// Rebuild a deck from plain save data.
///
/// The `playable` flag starts optimistic; callers with a catalog should
/// revalidate.
pub fn deserialize(data: serde_json::Value) -> Result<Deck, DeckError> {
    Ok(serde_json::from_value(data)?)
}
