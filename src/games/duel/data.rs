//! Game data loaded at startup.
//!
//! Everything a duel game is configured with comes from one JSON document:
//!
//! ```json
//! {
//!   "cards": [{"id": 1, "name": "Salamander", "element": "Fire", "level": 2, "power": 3}],
//!   "rulesets": [{"name": "Standard", "min_deck_size": 40, "max_deck_size": 60, "max_copies": 4}],
//!   "boosters": [{"id": 900, "name": "Starter", "pool": [1]}],
//!   "battle": {"starting_health": 20},
//!   "effects": [{"card": 1, "trigger": "Win", "effect": {"Heal": 2}}]
//! }
//! ```
//!
//! Every section is optional. Loading checks the data as a whole, so a bad
//! reference fails at startup rather than mid-battle.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{CardRegistry, CardTemplate};
use crate::collection::BoosterPack;
use crate::core::BattleConfig;
use crate::decks::Ruleset;
use crate::effects::EffectBinding;
use crate::error::ConfigError;

/// Static configuration of a duel game.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub cards: Vec<CardTemplate>,
    pub rulesets: Vec<Ruleset>,
    pub boosters: Vec<BoosterPack>,
    pub battle: BattleConfig,
    pub effects: Vec<EffectBinding>,
}

impl GameData {
    /// Parse and check a game data document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let data: GameData = serde_json::from_str(json)?;
        data.catalog()?;
        Ok(data)
    }

    /// Build the card catalog, checking rulesets and boosters against it.
    pub fn catalog(&self) -> Result<CardRegistry, ConfigError> {
        let catalog = CardRegistry::from_templates(self.cards.iter().cloned())?;

        let mut names = FxHashSet::default();
        for ruleset in &self.rulesets {
            ruleset.check()?;
            if !names.insert(ruleset.name.as_str()) {
                return Err(ConfigError::DuplicateRuleset(ruleset.name.clone()));
            }
        }

        let mut ids = FxHashSet::default();
        for booster in &self.boosters {
            booster.check(&catalog)?;
            if !ids.insert(booster.id) {
                return Err(ConfigError::DuplicateBooster(booster.id));
            }
        }

        Ok(catalog)
    }
}
