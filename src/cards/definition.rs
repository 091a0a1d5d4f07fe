//! Card templates - static card data.
//!
//! A `CardTemplate` holds what the catalog says about a card: its
//! element, base stats and rarity. Per-copy state (current stats, whether
//! it is face-up) lives in `Card`.

use serde::{Deserialize, Serialize};

use super::element::Element;

/// Identifier of a catalog card (the host's item id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The three numeric battle stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStats {
    pub level: i64,
    pub power: i64,
    pub health: i64,
}

impl CardStats {
    #[must_use]
    pub const fn new(level: i64, power: i64, health: i64) -> Self {
        Self { level, power, health }
    }

    /// Component-wise difference `self - base`.
    #[must_use]
    pub const fn delta(self, base: CardStats) -> CardStats {
        CardStats {
            level: self.level - base.level,
            power: self.power - base.power,
            health: self.health - base.health,
        }
    }

    /// Component-wise sum.
    #[must_use]
    pub const fn plus(self, other: CardStats) -> CardStats {
        CardStats {
            level: self.level + other.level,
            power: self.power + other.power,
            health: self.health + other.health,
        }
    }
}

/// Static catalog entry for a card.
///
/// ```
/// use card_duel::cards::{CardId, CardTemplate, Element};
///
/// let ifrit = CardTemplate::new(CardId::new(7), "Ifrit")
///     .with_element(Element::Fire)
///     .with_stats(3, 8, 4)
///     .with_rarity(2);
///
/// assert_eq!(ifrit.stats.power, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,

    pub name: String,

    #[serde(default)]
    pub element: Element,

    #[serde(flatten)]
    pub stats: CardStats,

    /// Rarity ordinal; higher is rarer.
    #[serde(default)]
    pub rarity: u8,

    /// Free-form card type ("Monster", "Spell", ...). Rulesets can filter on it.
    #[serde(default)]
    pub card_type: String,
}

impl CardTemplate {
    /// Create a template with default element, stats and rarity.
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            element: Element::None,
            stats: CardStats::default(),
            rarity: 0,
            card_type: String::new(),
        }
    }

    /// Set the element (builder pattern).
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    /// Set level, power and health (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, level: i64, power: i64, health: i64) -> Self {
        self.stats = CardStats::new(level, power, health);
        self
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: u8) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the card type (builder pattern).
    #[must_use]
    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = card_type.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let template = CardTemplate::new(CardId::new(1), "Sylph")
            .with_element(Element::Wind)
            .with_stats(2, 5, 3)
            .with_rarity(1)
            .with_card_type("Monster");

        assert_eq!(template.element, Element::Wind);
        assert_eq!(template.stats, CardStats::new(2, 5, 3));
        assert_eq!(template.rarity, 1);
        assert_eq!(template.card_type, "Monster");
    }

    #[test]
    fn test_stats_arithmetic() {
        let base = CardStats::new(2, 5, 3);
        let buffed = base.plus(CardStats::new(1, 0, -1));

        assert_eq!(buffed, CardStats::new(3, 5, 2));
        assert_eq!(buffed.delta(base), CardStats::new(1, 0, -1));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"id": 4, "name": "Golem", "element": "Earth", "level": 3, "power": 6, "health": 9, "rarity": 2}"#;
        let template: CardTemplate = serde_json::from_str(json).unwrap();

        assert_eq!(template.id, CardId::new(4));
        assert_eq!(template.stats, CardStats::new(3, 6, 9));
        assert!(template.card_type.is_empty());
    }
}
