//! The duel game surface called by host scripts.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::data::GameData;
use crate::battle::{AiBehavior, BattleSession};
use crate::cards::{CardCatalog, CardId, CardRegistry, CardTemplate};
use crate::collection::{BoosterPack, Collection};
use crate::core::{BattleConfig, BattleState, GameRng, Side};
use crate::decks::{Deck, DeckStorage, Ruleset, UnlockProgress, ValidationReport};
use crate::effects::{CardEffect, EffectContext, EffectRegistry, EffectTrigger};
use crate::error::{BattleError, ConfigError, DeckError};
use crate::rules::MatchResult;

/// Builder for a `DuelGame`.
pub struct DuelGameBuilder {
    data: GameData,
    effects: EffectRegistry,
    collection: Collection,
    decks: DeckStorage,
    seed: u64,
}

impl Default for DuelGameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DuelGameBuilder {
    pub fn new() -> Self {
        Self::from_data(GameData::default())
    }

    /// Start from loaded game data. Its effect bindings are registered.
    pub fn from_data(data: GameData) -> Self {
        let mut effects = EffectRegistry::new();
        effects.register_bindings(data.effects.iter().cloned());
        Self {
            data,
            effects,
            collection: Collection::new(),
            decks: DeckStorage::new(),
            seed: 0,
        }
    }

    pub fn card(mut self, template: CardTemplate) -> Self {
        self.data.cards.push(template);
        self
    }

    pub fn cards(mut self, templates: impl IntoIterator<Item = CardTemplate>) -> Self {
        self.data.cards.extend(templates);
        self
    }

    pub fn ruleset(mut self, ruleset: Ruleset) -> Self {
        self.data.rulesets.push(ruleset);
        self
    }

    pub fn booster(mut self, booster: BoosterPack) -> Self {
        self.data.boosters.push(booster);
        self
    }

    pub fn battle_config(mut self, config: BattleConfig) -> Self {
        self.data.battle = config;
        self
    }

    /// Attach a behaviour to a card.
    pub fn effect(mut self, card: CardId, trigger: EffectTrigger, effect: impl CardEffect + 'static) -> Self {
        self.effects.register(card, trigger, effect);
        self
    }

    /// Attach a closure behaviour to a card.
    pub fn effect_fn<F>(mut self, card: CardId, trigger: EffectTrigger, f: F) -> Self
    where
        F: Fn(&mut EffectContext<'_>) -> Result<(), BattleError> + 'static,
    {
        self.effects.register_fn(card, trigger, f);
        self
    }

    /// Cards and boosters the player starts with.
    pub fn collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self
    }

    /// Previously saved decks. They are revalidated on `build`.
    pub fn decks(mut self, decks: DeckStorage) -> Self {
        self.decks = decks;
        self
    }

    /// Seed for battle RNGs and booster openings.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the data and build the game.
    pub fn build(self) -> Result<DuelGame, ConfigError> {
        let catalog = self.data.catalog()?;
        let boosters = self.data.boosters.into_iter().map(|b| (b.id, b)).collect();

        let mut game = DuelGame {
            catalog,
            rulesets: self.data.rulesets,
            boosters,
            collection: self.collection,
            decks: self.decks,
            battle: self.data.battle,
            effects: Rc::new(self.effects),
            flags: Vec::new(),
            rng: GameRng::new(self.seed),
        };
        game.revalidate_all();
        tracing::info!(
            cards = game.catalog.len(),
            rulesets = game.rulesets.len(),
            boosters = game.boosters.len(),
            decks = game.decks.len(),
            "duel game loaded"
        );
        Ok(game)
    }
}

/// Deck building, collection and battle setup for one player.
///
/// ## Example
///
/// ```
/// use card_duel::battle::AiBehavior;
/// use card_duel::cards::{CardId, CardTemplate};
/// use card_duel::collection::Collection;
/// use card_duel::decks::Ruleset;
/// use card_duel::games::duel::DuelGameBuilder;
///
/// let mut collection = Collection::new();
/// collection.add_card(CardId::new(1), 10);
///
/// let mut game = DuelGameBuilder::new()
///     .card(CardTemplate::new(CardId::new(1), "Squire").with_stats(1, 2, 1))
///     .ruleset(Ruleset::new("Casual").with_deck_size(5, 10))
///     .collection(collection)
///     .build()
///     .unwrap();
///
/// let deck = game.new_deck("Casual", "Squires").unwrap();
/// for _ in 0..5 {
///     game.add_card_to_deck(deck, CardId::new(1)).unwrap();
/// }
/// let session = game.start_battle(deck, deck, AiBehavior::Random).unwrap();
/// assert_eq!(session.state().card_count(), 10);
/// ```
pub struct DuelGame {
    catalog: CardRegistry,
    rulesets: Vec<Ruleset>,
    boosters: FxHashMap<u32, BoosterPack>,
    collection: Collection,
    decks: DeckStorage,
    battle: BattleConfig,
    effects: Rc<EffectRegistry>,
    flags: Vec<String>,
    rng: GameRng,
}

fn find_ruleset<'a>(rulesets: &'a [Ruleset], name: &str) -> Result<&'a Ruleset, DeckError> {
    rulesets
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| DeckError::UnknownRuleset(name.to_string()))
}

/// The ruleset a saved deck was built under.
fn deck_ruleset<'a>(decks: &DeckStorage, rulesets: &'a [Ruleset], deck: usize) -> Result<&'a Ruleset, DeckError> {
    let deck = decks.get(deck).ok_or(DeckError::UnknownDeck(deck))?;
    find_ruleset(rulesets, &deck.ruleset_name)
}

impl DuelGame {
    // === Accessors ===

    pub fn catalog(&self) -> &CardRegistry {
        &self.catalog
    }

    pub fn rulesets(&self) -> &[Ruleset] {
        &self.rulesets
    }

    pub fn ruleset(&self, name: &str) -> Option<&Ruleset> {
        self.rulesets.iter().find(|r| r.name == name)
    }

    pub fn booster(&self, id: u32) -> Option<&BoosterPack> {
        self.boosters.get(&id)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut Collection {
        &mut self.collection
    }

    pub fn decks(&self) -> &DeckStorage {
        &self.decks
    }

    pub fn deck(&self, index: usize) -> Option<&Deck> {
        self.decks.get(index)
    }

    pub fn battle_config(&self) -> &BattleConfig {
        &self.battle
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    // === Unlocks ===

    /// Progress the unlock conditions see.
    pub fn progress(&self) -> UnlockProgress {
        UnlockProgress {
            total_wins: self.decks.total_wins(),
            flags: self.flags.clone(),
        }
    }

    /// Set a host-defined progress flag.
    pub fn set_flag(&mut self, flag: impl Into<String>) {
        let flag = flag.into();
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    /// Rulesets new decks may currently use.
    pub fn unlocked_rulesets(&self) -> Vec<&Ruleset> {
        let progress = self.progress();
        self.rulesets.iter().filter(|r| r.unlock.is_met(&progress)).collect()
    }

    // === Decks ===

    /// Create an empty deck under an unlocked ruleset. Returns its index.
    pub fn new_deck(&mut self, ruleset: &str, name: impl Into<String>) -> Result<usize, DeckError> {
        let ruleset = find_ruleset(&self.rulesets, ruleset)?;
        if !ruleset.unlock.is_met(&self.progress()) {
            return Err(DeckError::LockedRuleset(ruleset.name.clone()));
        }
        Ok(self.decks.new_deck(name, ruleset))
    }

    /// Add one owned copy of a card to a deck.
    pub fn add_card_to_deck(&mut self, deck: usize, card: CardId) -> Result<(), DeckError> {
        let ruleset = deck_ruleset(&self.decks, &self.rulesets, deck)?;
        self.decks
            .add_card(deck, card, ruleset, &self.catalog, Some(&self.collection))
    }

    pub fn remove_card_from_deck(&mut self, deck: usize, card: CardId) -> Result<(), DeckError> {
        let ruleset = deck_ruleset(&self.decks, &self.rulesets, deck)?;
        self.decks.remove_card(deck, card, ruleset, &self.catalog)
    }

    pub fn delete_deck(&mut self, deck: usize) -> Result<Deck, DeckError> {
        self.decks.delete(deck)
    }

    pub fn toggle_favorite(&mut self, deck: usize) -> Result<bool, DeckError> {
        self.decks.toggle_favorite(deck)
    }

    /// Check a deck against its ruleset and update its playable flag.
    pub fn validate_deck(&mut self, deck: usize) -> Result<ValidationReport, DeckError> {
        let ruleset = deck_ruleset(&self.decks, &self.rulesets, deck)?;
        self.decks.revalidate(deck, ruleset, &self.catalog)
    }

    /// Save every deck in the compact binary format.
    pub fn save_decks(&self) -> Result<Vec<u8>, DeckError> {
        self.decks.to_bytes()
    }

    /// Replace the decks with saved ones and revalidate them.
    pub fn load_decks(&mut self, bytes: &[u8]) -> Result<usize, DeckError> {
        self.decks = DeckStorage::from_bytes(bytes)?;
        self.revalidate_all();
        Ok(self.decks.len())
    }

    /// Refresh every deck's playable flag. Decks whose ruleset no longer
    /// exists become unplayable.
    fn revalidate_all(&mut self) {
        for index in 0..self.decks.len() {
            if self.validate_deck(index).is_err() {
                if let Some(deck) = self.decks.get_mut(index) {
                    tracing::warn!(deck = %deck.name, ruleset = %deck.ruleset_name, "deck uses an unknown ruleset");
                    deck.playable = false;
                }
            }
        }
    }

    // === Boosters ===

    /// Open `times` packs of a booster and add the cards to the collection.
    ///
    /// With `consume`, one owned pack is spent per opening; nothing is
    /// opened or spent when too few are owned.
    pub fn open_booster(&mut self, item_id: u32, times: u32, consume: bool) -> Result<Vec<CardId>, DeckError> {
        let booster = self.boosters.get(&item_id).ok_or(DeckError::UnknownBooster(item_id))?;
        if consume && !self.collection.take_boosters(item_id, times) {
            return Err(DeckError::BoosterUnavailable {
                booster: item_id,
                needed: times,
                owned: self.collection.boosters(item_id),
            });
        }

        let mut opened = Vec::new();
        for _ in 0..times {
            opened.extend(booster.open(&self.catalog, &mut self.rng));
        }
        for &card in &opened {
            self.collection.add_card(card, 1);
        }
        tracing::info!(booster = item_id, name = %booster.name, times, cards = opened.len(), "opened boosters");
        Ok(opened)
    }

    // === Battles ===

    /// Set up a battle between two saved decks.
    ///
    /// The player side waits for `select_battle_card`; the opponent is
    /// driven by `ai`. Both decks are revalidated first and an illegal one
    /// is refused.
    pub fn start_battle(
        &mut self,
        player_deck: usize,
        opponent_deck: usize,
        ai: AiBehavior,
    ) -> Result<BattleSession, DeckError> {
        let mut state = BattleState::new(self.battle.clone(), self.rng.next_seed());
        for (side, index) in [(Side::Player, player_deck), (Side::Opponent, opponent_deck)] {
            let report = self.validate_deck(index)?;
            let deck = self.decks.get(index).ok_or(DeckError::UnknownDeck(index))?;
            if !report.is_legal() {
                return Err(DeckError::Unplayable {
                    name: deck.name.clone(),
                    report,
                });
            }
            state.load_deck(side, deck.name.clone(), &deck.cards, &self.catalog)?;
        }
        state.participant_mut(Side::Opponent).ai = Some(ai);

        tracing::info!(player_deck, opponent_deck, ?ai, "battle starting");
        Ok(BattleSession::new(state, Rc::clone(&self.effects)))
    }

    /// Count a finished battle in the player's deck stats.
    pub fn record_result(&mut self, deck: usize, result: MatchResult) -> Result<(), DeckError> {
        let before = self.unlocked_rulesets().len();
        self.decks.record_result(deck, result.standing_for(Side::Player))?;
        let after = self.unlocked_rulesets().len();
        if after > before {
            tracing::info!(unlocked = after - before, "new rulesets unlocked");
        }
        Ok(())
    }

    /// Whether a card is known to the catalog.
    pub fn knows(&self, card: CardId) -> bool {
        self.catalog.contains(card)
    }
}
