//! Card catalog lookup.
//!
//! The catalog is a read-only `CardId -> CardTemplate` map. `CardCatalog`
//! is the seam: the rule core only needs lookups, so hosts with their own
//! item database can implement it directly. `CardRegistry` is the
//! in-memory implementation.

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardTemplate};
use crate::error::ConfigError;

/// Read-only lookup of card templates.
pub trait CardCatalog {
    /// Get a template by id.
    fn template(&self, id: CardId) -> Option<&CardTemplate>;

    /// Check if an id is known.
    fn contains(&self, id: CardId) -> bool {
        self.template(id).is_some()
    }
}

/// In-memory card catalog.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardCatalog, CardId, CardRegistry, CardTemplate};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::new(CardId::new(1), "Salamander")).unwrap();
///
/// assert_eq!(registry.template(CardId::new(1)).unwrap().name, "Salamander");
/// assert!(registry.register(CardTemplate::new(CardId::new(1), "Again")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardTemplate>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from templates, rejecting duplicate ids.
    pub fn from_templates(templates: impl IntoIterator<Item = CardTemplate>) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for template in templates {
            registry.register(template)?;
        }
        Ok(registry)
    }

    /// Register a template.
    pub fn register(&mut self, template: CardTemplate) -> Result<(), ConfigError> {
        if self.cards.contains_key(&template.id) {
            return Err(ConfigError::DuplicateCard(template.id));
        }
        if template.stats.level == 0 && template.stats.power == 0 {
            tracing::warn!(card = %template.id, name = %template.name, "card has neither level nor power");
        }
        self.cards.insert(template.id, template);
        Ok(())
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        let mut templates: Vec<_> = self.cards.values().collect();
        templates.sort_by_key(|t| t.id);
        templates.into_iter()
    }

    /// Find templates matching a predicate, in id order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardTemplate>
    where
        F: Fn(&CardTemplate) -> bool,
    {
        self.iter().filter(move |t| predicate(t))
    }
}

impl CardCatalog for CardRegistry {
    fn template(&self, id: CardId) -> Option<&CardTemplate> {
        self.cards.get(&id)
    }
}
