//! Battle configuration.
//!
//! House rules for a duel: starting counters, hand and draw sizes, battle
//! damage, and the policies for the situations the rules leave open (an
//! empty library, shields). Every field has a default so partial JSON
//! loads cleanly.

use serde::{Deserialize, Serialize};

/// What happens when a draw is required and the library is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyLibraryRule {
    /// The missing draw is a no-op.
    #[default]
    Ignore,
    /// The drawing participant loses at the next victory check.
    Lose,
    /// Discard is returned to the library and shuffled, then the draw
    /// continues. Only when Discard is empty too is the draw a no-op.
    Recycle,
}

/// How incoming damage interacts with shields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageRule {
    /// Damage goes straight to health; shields are left to scripts.
    #[default]
    Direct,
    /// Each shield point absorbs one point of damage before health.
    ShieldFirst,
}

/// House rules for one battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Health each participant starts with.
    pub starting_health: i64,

    /// Nominal maximum health. Buffs may exceed it.
    pub max_health: i64,

    /// Shield count each participant starts with.
    pub starting_shield: i64,

    /// Cards drawn by each participant in the Start phase.
    pub initial_hand_size: usize,

    /// Cards drawn by each participant in every Draw phase.
    pub cards_per_draw: usize,

    /// Damage the battle winner deals to the loser's participant.
    pub battle_damage: i64,

    /// Whether health breaks ties after level and power.
    pub health_check: bool,

    /// Policy for drawing from an empty library.
    pub empty_library: EmptyLibraryRule,

    /// Shield policy.
    pub damage: DamageRule,

    /// End the match as a draw after this many turns.
    pub max_turns: Option<u32>,

    /// Shuffle both libraries before the opening hands.
    pub shuffle_on_start: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            max_health: 20,
            starting_shield: 0,
            initial_hand_size: 5,
            cards_per_draw: 1,
            battle_damage: 5,
            health_check: false,
            empty_library: EmptyLibraryRule::default(),
            damage: DamageRule::default(),
            max_turns: None,
            shuffle_on_start: true,
        }
    }
}

impl BattleConfig {
    /// Set the empty-library policy (builder pattern).
    #[must_use]
    pub fn with_empty_library(mut self, rule: EmptyLibraryRule) -> Self {
        self.empty_library = rule;
        self
    }

    /// Enable or disable the health tie-break (builder pattern).
    #[must_use]
    pub fn with_health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    /// Set the turn limit (builder pattern).
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    /// Set starting and maximum health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.starting_health = health;
        self.max_health = health;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();

        assert_eq!(config.initial_hand_size, 5);
        assert_eq!(config.cards_per_draw, 1);
        assert_eq!(config.battle_damage, 5);
        assert!(!config.health_check);
        assert_eq!(config.empty_library, EmptyLibraryRule::Ignore);
        assert_eq!(config.damage, DamageRule::Direct);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BattleConfig =
            serde_json::from_str(r#"{"battle_damage": 3, "empty_library": "Lose"}"#).unwrap();

        assert_eq!(config.battle_damage, 3);
        assert_eq!(config.empty_library, EmptyLibraryRule::Lose);
        assert_eq!(config.initial_hand_size, 5);
    }

    #[test]
    fn test_builders() {
        let config = BattleConfig::default()
            .with_health(8)
            .with_health_check(true)
            .with_max_turns(12);

        assert_eq!(config.starting_health, 8);
        assert_eq!(config.max_health, 8);
        assert!(config.health_check);
        assert_eq!(config.max_turns, Some(12));
    }
}
