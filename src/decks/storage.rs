//! The player's saved decks.
//!
//! `DeckStorage` owns every deck and enforces ruleset bounds as cards are
//! added. Each edit refreshes the deck's `playable` flag, so a deck below
//! the ruleset's minimum size reads unplayable until it is filled. A deck
//! can still drift out of legality when the ruleset or card data changes
//! underneath it; `revalidate` catches that case.

use serde::{Deserialize, Serialize};

use super::deck::Deck;
use super::ruleset::Ruleset;
use super::validator::{validate, ValidationReport};
use crate::cards::{CardCatalog, CardId};
use crate::collection::Collection;
use crate::error::DeckError;
use crate::rules::Standing;

/// Ordered list of saved decks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStorage {
    decks: Vec<Deck>,
}

impl DeckStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty deck under a ruleset. Returns its index.
    pub fn new_deck(&mut self, name: impl Into<String>, ruleset: &Ruleset) -> usize {
        let mut deck = Deck::new(name, ruleset.name.clone());
        // An empty deck can only break the size bounds.
        deck.playable = ruleset.min_deck_size == 0;
        tracing::debug!(deck = %deck.name, ruleset = %ruleset.name, "new deck");
        self.decks.push(deck);
        self.decks.len() - 1
    }

    /// Insert an existing deck, for example one loaded from save data.
    pub fn insert(&mut self, deck: Deck) -> usize {
        self.decks.push(deck);
        self.decks.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Deck> {
        self.decks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Deck> {
        self.decks.get_mut(index)
    }

    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Add one copy of a card to a deck.
    ///
    /// Refuses the card when the deck is full, the copy limit is reached,
    /// the ruleset's filter rejects it, or (with a collection) the deck
    /// already holds every owned copy.
    pub fn add_card(
        &mut self,
        index: usize,
        card: CardId,
        ruleset: &Ruleset,
        catalog: &(impl CardCatalog + ?Sized),
        collection: Option<&Collection>,
    ) -> Result<(), DeckError> {
        let template = catalog.template(card).ok_or(DeckError::UnknownCard(card))?;
        let deck = self.decks.get_mut(index).ok_or(DeckError::UnknownDeck(index))?;
        let count = deck.count_of(card);

        let rejects = || DeckError::RulesetRejects {
            ruleset: ruleset.name.clone(),
            card,
        };
        if !ruleset.allows_size(deck.len() + 1) || !ruleset.filter.matches(template) {
            return Err(rejects());
        }
        if ruleset.copy_limit(template).is_some_and(|limit| count >= limit) {
            return Err(rejects());
        }
        if let Some(collection) = collection {
            if collection.owned(card) <= count {
                return Err(DeckError::NotOwned(card));
            }
        }

        deck.push(card);
        refresh(deck, ruleset, catalog);
        Ok(())
    }

    /// Remove one copy of a card from a deck.
    pub fn remove_card(
        &mut self,
        index: usize,
        card: CardId,
        ruleset: &Ruleset,
        catalog: &(impl CardCatalog + ?Sized),
    ) -> Result<(), DeckError> {
        let deck = self.decks.get_mut(index).ok_or(DeckError::UnknownDeck(index))?;
        deck.remove(card)?;
        refresh(deck, ruleset, catalog);
        Ok(())
    }

    /// Delete a deck. Later decks shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Deck, DeckError> {
        if index >= self.decks.len() {
            return Err(DeckError::UnknownDeck(index));
        }
        let deck = self.decks.remove(index);
        tracing::debug!(deck = %deck.name, "deleted deck");
        Ok(deck)
    }

    /// Flip a deck's favorite flag. Returns the new value.
    pub fn toggle_favorite(&mut self, index: usize) -> Result<bool, DeckError> {
        let deck = self.decks.get_mut(index).ok_or(DeckError::UnknownDeck(index))?;
        deck.favorite = !deck.favorite;
        Ok(deck.favorite)
    }

    /// Validate a deck and store the result in its `playable` flag.
    pub fn revalidate(
        &mut self,
        index: usize,
        ruleset: &Ruleset,
        catalog: &(impl CardCatalog + ?Sized),
    ) -> Result<ValidationReport, DeckError> {
        let deck = self.decks.get_mut(index).ok_or(DeckError::UnknownDeck(index))?;
        let report = validate(deck, ruleset, catalog);
        deck.playable = report.is_legal();
        if !deck.playable {
            tracing::warn!(deck = %deck.name, %report, "saved deck is not playable");
        }
        Ok(report)
    }

    /// Count a finished battle in a deck's stats.
    pub fn record_result(&mut self, index: usize, standing: Standing) -> Result<(), DeckError> {
        self.decks
            .get_mut(index)
            .ok_or(DeckError::UnknownDeck(index))?
            .stats
            .record(standing);
        Ok(())
    }

    /// Wins across every deck.
    #[must_use]
    pub fn total_wins(&self) -> u32 {
        self.decks.iter().map(|d| d.stats.won).sum()
    }

    /// Compact binary save format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DeckError> {
        Ok(bincode::serialize(self)?)
    }

    /// Load from `to_bytes` output. Every deck comes back marked playable;
    /// revalidate against the current rulesets.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DeckError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Recompute the `playable` flag after an edit.
fn refresh(deck: &mut Deck, ruleset: &Ruleset, catalog: &(impl CardCatalog + ?Sized)) {
    deck.playable = validate(deck, ruleset, catalog).is_legal();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRegistry, CardTemplate, Element};
    use crate::decks::CardFilter;

    fn catalog() -> CardRegistry {
        CardRegistry::from_templates([
            CardTemplate::new(CardId::new(1), "Spark").with_element(Element::Fire).with_stats(1, 2, 1),
            CardTemplate::new(CardId::new(2), "Legend").with_rarity(4).with_stats(5, 9, 5),
            CardTemplate::new(CardId::new(3), "Shade").with_element(Element::Dark).with_stats(2, 2, 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_card_respects_copy_limit() {
        let ruleset = Ruleset::new("R").with_max_copies(2);
        let mut storage = DeckStorage::new();
        let deck = storage.new_deck("D", &ruleset);

        storage.add_card(deck, CardId::new(1), &ruleset, &catalog(), None).unwrap();
        storage.add_card(deck, CardId::new(1), &ruleset, &catalog(), None).unwrap();
        let err = storage.add_card(deck, CardId::new(1), &ruleset, &catalog(), None);

        assert!(matches!(err, Err(DeckError::RulesetRejects { .. })));
        assert_eq!(storage.get(deck).unwrap().len(), 2);
    }

    #[test]
    fn test_add_card_respects_size_and_filter() {
        let ruleset = Ruleset::new("R")
            .with_deck_size(0, 1)
            .with_filter(CardFilter::Not(Box::new(CardFilter::Element(Element::Dark))));
        let mut storage = DeckStorage::new();
        let deck = storage.new_deck("D", &ruleset);

        assert!(storage.add_card(deck, CardId::new(3), &ruleset, &catalog(), None).is_err());
        storage.add_card(deck, CardId::new(1), &ruleset, &catalog(), None).unwrap();
        assert!(storage.add_card(deck, CardId::new(2), &ruleset, &catalog(), None).is_err());
    }

    #[test]
    fn test_add_card_checks_collection() {
        let ruleset = Ruleset::new("R");
        let mut collection = Collection::new();
        collection.add_card(CardId::new(2), 1);
        let mut storage = DeckStorage::new();
        let deck = storage.new_deck("D", &ruleset);

        storage
            .add_card(deck, CardId::new(2), &ruleset, &catalog(), Some(&collection))
            .unwrap();
        assert!(matches!(
            storage.add_card(deck, CardId::new(2), &ruleset, &catalog(), Some(&collection)),
            Err(DeckError::NotOwned(_))
        ));
        assert!(matches!(
            storage.add_card(deck, CardId::new(99), &ruleset, &catalog(), None),
            Err(DeckError::UnknownCard(_))
        ));
    }

    #[test]
    fn test_favorite_delete_and_stats() {
        let ruleset = Ruleset::new("R");
        let mut storage = DeckStorage::new();
        let first = storage.new_deck("First", &ruleset);
        let second = storage.new_deck("Second", &ruleset);

        assert!(storage.toggle_favorite(second).unwrap());
        storage.record_result(first, Standing::Win).unwrap();
        storage.record_result(second, Standing::Win).unwrap();
        assert_eq!(storage.total_wins(), 2);

        let removed = storage.delete(first).unwrap();
        assert_eq!(removed.name, "First");
        assert_eq!(storage.get(0).unwrap().name, "Second");
        assert!(matches!(storage.delete(5), Err(DeckError::UnknownDeck(5))));
    }

    #[test]
    fn test_revalidate_marks_unplayable() {
        let ruleset = Ruleset::new("R").with_deck_size(3, 0);
        let mut storage = DeckStorage::new();
        let deck = storage.new_deck("D", &ruleset);
        storage.add_card(deck, CardId::new(1), &ruleset, &catalog(), None).unwrap();

        let report = storage.revalidate(deck, &ruleset, &catalog()).unwrap();

        assert!(!report.is_legal());
        assert!(!storage.get(deck).unwrap().playable);
    }

    #[test]
    fn test_edits_refresh_playable() {
        let ruleset = Ruleset::new("R").with_deck_size(3, 0);
        let catalog = catalog();
        let mut storage = DeckStorage::new();
        let deck = storage.new_deck("D", &ruleset);
        assert!(!storage.get(deck).unwrap().playable);

        for _ in 0..3 {
            storage.add_card(deck, CardId::new(1), &ruleset, &catalog, None).unwrap();
        }
        assert!(storage.get(deck).unwrap().playable);

        storage.remove_card(deck, CardId::new(1), &ruleset, &catalog).unwrap();
        assert!(!storage.get(deck).unwrap().playable);
        assert!(matches!(
            storage.remove_card(deck, CardId::new(3), &ruleset, &catalog),
            Err(DeckError::CardNotInDeck(_))
        ));
    }

    #[test]
    fn test_bytes_round_trip() {
        let ruleset = Ruleset::new("R");
        let mut storage = DeckStorage::new();
        let deck = storage.new_deck("D", &ruleset);
        storage.add_card(deck, CardId::new(1), &ruleset, &catalog(), None).unwrap();
        storage.record_result(deck, Standing::Tie).unwrap();

        let bytes = storage.to_bytes().unwrap();
        let loaded = DeckStorage::from_bytes(&bytes).unwrap();

        assert_eq!(loaded, storage);
    }
}
