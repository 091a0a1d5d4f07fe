//! Deck-construction rulesets.
//!
//! A ruleset bounds deck size and copy counts, filters which cards are
//! admissible at all, and may tighten copy limits for groups of cards
//! (for example at most one copy of each rarity-4 card). Rulesets are
//! plain data so they can be loaded from configuration, and they are
//! immutable once loaded: decks refer to them by name.

use serde::{Deserialize, Serialize};

use crate::cards::{CardTemplate, Element};
use crate::error::ConfigError;

/// Predicate over card templates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFilter {
    /// Every card matches.
    #[default]
    Any,
    /// Card has this element.
    Element(Element),
    /// Card has this card type.
    CardType(String),
    /// Rarity within inclusive bounds.
    Rarity { min: Option<u8>, max: Option<u8> },
    /// Level within inclusive bounds.
    Level { min: Option<i64>, max: Option<i64> },
    /// Card id is in the list.
    Ids(Vec<u32>),
    Not(Box<CardFilter>),
    All(Vec<CardFilter>),
    AnyOf(Vec<CardFilter>),
}

impl CardFilter {
    /// Check if a template matches.
    #[must_use]
    pub fn matches(&self, card: &CardTemplate) -> bool {
        match self {
            CardFilter::Any => true,
            CardFilter::Element(element) => card.element == *element,
            CardFilter::CardType(card_type) => card.card_type == *card_type,
            CardFilter::Rarity { min, max } => in_bounds(card.rarity, *min, *max),
            CardFilter::Level { min, max } => in_bounds(card.stats.level, *min, *max),
            CardFilter::Ids(ids) => ids.contains(&card.id.raw()),
            CardFilter::Not(inner) => !inner.matches(card),
            CardFilter::All(filters) => filters.iter().all(|f| f.matches(card)),
            CardFilter::AnyOf(filters) => filters.iter().any(|f| f.matches(card)),
        }
    }

    /// Rarity exactly `rarity`.
    #[must_use]
    pub fn rarity(rarity: u8) -> Self {
        CardFilter::Rarity {
            min: Some(rarity),
            max: Some(rarity),
        }
    }
}

fn in_bounds<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

/// Tighter copy limit for the cards a filter selects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRestriction {
    pub applies_to: CardFilter,
    pub max_copies: u32,
}

impl CopyRestriction {
    /// Whether `count` copies of `card` are allowed by this restriction.
    #[must_use]
    pub fn allows(&self, card: &CardTemplate, count: u32) -> bool {
        !self.applies_to.matches(card) || count <= self.max_copies
    }
}

/// When a ruleset becomes selectable for new decks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockCondition {
    #[default]
    Always,
    /// After this many recorded battle wins across all decks.
    Wins(u32),
    /// When the host sets this progress flag.
    Flag(String),
}

/// Progress the unlock conditions are checked against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnlockProgress {
    pub total_wins: u32,
    pub flags: Vec<String>,
}

impl UnlockCondition {
    #[must_use]
    pub fn is_met(&self, progress: &UnlockProgress) -> bool {
        match self {
            UnlockCondition::Always => true,
            UnlockCondition::Wins(wins) => progress.total_wins >= *wins,
            UnlockCondition::Flag(flag) => progress.flags.iter().any(|f| f == flag),
        }
    }
}

/// A named set of deck-construction constraints.
///
/// `max_deck_size` and `max_copies` use 0 for "unbounded".
///
/// ```
/// use card_duel::decks::{CardFilter, Ruleset};
///
/// let standard = Ruleset::new("Standard")
///     .with_deck_size(40, 60)
///     .with_max_copies(4)
///     .with_restriction(CardFilter::rarity(4), 1);
///
/// assert_eq!(standard.restrictions.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,

    #[serde(default)]
    pub min_deck_size: usize,

    #[serde(default)]
    pub max_deck_size: usize,

    #[serde(default)]
    pub max_copies: u32,

    /// Cards that may appear at all.
    #[serde(default)]
    pub filter: CardFilter,

    #[serde(default)]
    pub restrictions: Vec<CopyRestriction>,

    #[serde(default)]
    pub unlock: UnlockCondition,
}

impl Ruleset {
    /// An unconstrained ruleset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_deck_size: 0,
            max_deck_size: 0,
            max_copies: 0,
            filter: CardFilter::Any,
            restrictions: Vec::new(),
            unlock: UnlockCondition::Always,
        }
    }

    /// Set the size bounds (builder pattern).
    #[must_use]
    pub fn with_deck_size(mut self, min: usize, max: usize) -> Self {
        self.min_deck_size = min;
        self.max_deck_size = max;
        self
    }

    /// Set the global copy limit (builder pattern).
    #[must_use]
    pub fn with_max_copies(mut self, max: u32) -> Self {
        self.max_copies = max;
        self
    }

    /// Set the admission filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: CardFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Add a copy restriction (builder pattern).
    #[must_use]
    pub fn with_restriction(mut self, applies_to: CardFilter, max_copies: u32) -> Self {
        self.restrictions.push(CopyRestriction { applies_to, max_copies });
        self
    }

    /// Set the unlock condition (builder pattern).
    #[must_use]
    pub fn with_unlock(mut self, unlock: UnlockCondition) -> Self {
        self.unlock = unlock;
        self
    }

    /// Whether the deck may grow past `size` cards.
    #[must_use]
    pub fn allows_size(&self, size: usize) -> bool {
        self.max_deck_size == 0 || size <= self.max_deck_size
    }

    /// Largest number of copies of `card` this ruleset allows.
    ///
    /// `None` means unbounded. Restrictions only ever lower the global limit.
    #[must_use]
    pub fn copy_limit(&self, card: &CardTemplate) -> Option<u32> {
        let global = (self.max_copies > 0).then_some(self.max_copies);
        self.restrictions
            .iter()
            .filter(|r| r.applies_to.matches(card))
            .map(|r| r.max_copies)
            .fold(global, |limit, restricted| {
                Some(limit.map_or(restricted, |l| l.min(restricted)))
            })
    }

    /// Reject internally inconsistent rulesets at load time.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidRuleset {
                name: self.name.clone(),
                reason: "name is empty".to_string(),
            });
        }
        if self.max_deck_size != 0 && self.min_deck_size > self.max_deck_size {
            return Err(ConfigError::InvalidRuleset {
                name: self.name.clone(),
                reason: format!(
                    "minimum deck size {} exceeds maximum {}",
                    self.min_deck_size, self.max_deck_size
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn card(rarity: u8, element: Element) -> CardTemplate {
        CardTemplate::new(CardId::new(1), "Test")
            .with_rarity(rarity)
            .with_element(element)
            .with_stats(3, 3, 3)
    }

    #[test]
    fn test_filters() {
        let fire = card(2, Element::Fire);

        assert!(CardFilter::Any.matches(&fire));
        assert!(CardFilter::Element(Element::Fire).matches(&fire));
        assert!(!CardFilter::Element(Element::Water).matches(&fire));
        assert!(CardFilter::rarity(2).matches(&fire));
        assert!(CardFilter::Level { min: Some(3), max: None }.matches(&fire));
        assert!(!CardFilter::Level { min: None, max: Some(2) }.matches(&fire));
        assert!(CardFilter::Ids(vec![1, 2]).matches(&fire));
        assert!(CardFilter::Not(Box::new(CardFilter::Element(Element::Dark))).matches(&fire));
        assert!(!CardFilter::All(vec![CardFilter::Any, CardFilter::rarity(3)]).matches(&fire));
        assert!(CardFilter::AnyOf(vec![CardFilter::rarity(3), CardFilter::rarity(2)]).matches(&fire));
    }

    #[test]
    fn test_copy_limit_only_tightens() {
        let ruleset = Ruleset::new("R")
            .with_max_copies(3)
            .with_restriction(CardFilter::rarity(4), 1)
            .with_restriction(CardFilter::rarity(1), 10);

        assert_eq!(ruleset.copy_limit(&card(4, Element::None)), Some(1));
        assert_eq!(ruleset.copy_limit(&card(1, Element::None)), Some(3));
        assert_eq!(ruleset.copy_limit(&card(2, Element::None)), Some(3));
    }

    #[test]
    fn test_copy_limit_unbounded() {
        let open = Ruleset::new("Open");
        assert_eq!(open.copy_limit(&card(4, Element::None)), None);

        let restricted = Ruleset::new("Open").with_restriction(CardFilter::rarity(4), 2);
        assert_eq!(restricted.copy_limit(&card(4, Element::None)), Some(2));
    }

    #[test]
    fn test_restriction_allows() {
        let restriction = CopyRestriction {
            applies_to: CardFilter::Element(Element::Light),
            max_copies: 1,
        };

        assert!(restriction.allows(&card(1, Element::Light), 1));
        assert!(!restriction.allows(&card(1, Element::Light), 2));
        assert!(restriction.allows(&card(1, Element::Fire), 9));
    }

    #[test]
    fn test_unlock() {
        let progress = UnlockProgress {
            total_wins: 3,
            flags: vec!["beat_champion".to_string()],
        };

        assert!(UnlockCondition::Always.is_met(&progress));
        assert!(UnlockCondition::Wins(3).is_met(&progress));
        assert!(!UnlockCondition::Wins(4).is_met(&progress));
        assert!(UnlockCondition::Flag("beat_champion".into()).is_met(&progress));
        assert!(!UnlockCondition::Flag("other".into()).is_met(&progress));
    }

    #[test]
    fn test_check() {
        assert!(Ruleset::new("Ok").with_deck_size(40, 0).check().is_ok());
        assert!(Ruleset::new("Bad").with_deck_size(40, 30).check().is_err());
        assert!(Ruleset::new(" ").check().is_err());
    }

    #[test]
    fn test_json_defaults() {
        let ruleset: Ruleset = serde_json::from_str(r#"{"name": "Casual", "min_deck_size": 20}"#).unwrap();

        assert_eq!(ruleset.min_deck_size, 20);
        assert_eq!(ruleset.max_copies, 0);
        assert_eq!(ruleset.filter, CardFilter::Any);
        assert_eq!(ruleset.unlock, UnlockCondition::Always);
    }
}
