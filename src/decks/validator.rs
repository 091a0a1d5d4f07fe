//! Deck legality checks.
//!
//! Every check runs independently and all violations are reported, so the
//! deck builder can show the player everything that needs fixing at once.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deck::Deck;
use super::ruleset::Ruleset;
use crate::cards::{CardCatalog, CardId};

/// One reason a deck is not legal under a ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    TooFewCards { size: usize, min: usize },
    TooManyCards { size: usize, max: usize },
    /// Over the ruleset's global copy limit.
    TooManyCopies { card: CardId, count: u32, max: u32 },
    /// Over a tighter limit from one of the ruleset's restrictions.
    Restricted { card: CardId, count: u32, max: u32 },
    /// The ruleset's filter rejects this card.
    Filtered { card: CardId },
    /// The card is not in the catalog.
    UnknownCard { card: CardId },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::TooFewCards { size, min } => write!(f, "deck has {size} cards, needs at least {min}"),
            Violation::TooManyCards { size, max } => write!(f, "deck has {size} cards, at most {max} allowed"),
            Violation::TooManyCopies { card, count, max } => {
                write!(f, "{count} copies of {card}, at most {max} allowed")
            }
            Violation::Restricted { card, count, max } => {
                write!(f, "{count} copies of restricted {card}, at most {max} allowed")
            }
            Violation::Filtered { card } => write!(f, "{card} is not allowed by this ruleset"),
            Violation::UnknownCard { card } => write!(f, "{card} is not in the catalog"),
        }
    }
}

/// Outcome of validating a deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: SmallVec<[Violation; 4]>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.violations.is_empty()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.violations.is_empty() {
            return f.write_str("legal");
        }
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Check a deck against a ruleset.
///
/// Pure: the same deck, ruleset and catalog always give the same report.
pub fn validate(deck: &Deck, ruleset: &Ruleset, catalog: &(impl CardCatalog + ?Sized)) -> ValidationReport {
    let mut report = ValidationReport::default();
    let size = deck.len();

    if size < ruleset.min_deck_size {
        report.violations.push(Violation::TooFewCards {
            size,
            min: ruleset.min_deck_size,
        });
    }
    if !ruleset.allows_size(size) {
        report.violations.push(Violation::TooManyCards {
            size,
            max: ruleset.max_deck_size,
        });
    }

    for (card, count) in deck.card_counts() {
        let Some(template) = catalog.template(card) else {
            report.violations.push(Violation::UnknownCard { card });
            continue;
        };

        if !ruleset.filter.matches(template) {
            report.violations.push(Violation::Filtered { card });
        }

        if ruleset.max_copies > 0 && count > ruleset.max_copies {
            report.violations.push(Violation::TooManyCopies {
                card,
                count,
                max: ruleset.max_copies,
            });
        }

        let tightest = ruleset
            .restrictions
            .iter()
            .filter(|r| !r.allows(template, count))
            .map(|r| r.max_copies)
            .min();
        if let Some(max) = tightest {
            report.violations.push(Violation::Restricted { card, count, max });
        }
    }

    if !report.is_legal() {
        tracing::debug!(deck = %deck.name, ruleset = %ruleset.name, %report, "deck fails validation");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRegistry, CardTemplate, Element};
    use crate::decks::CardFilter;

    fn catalog() -> CardRegistry {
        CardRegistry::from_templates([
            CardTemplate::new(CardId::new(1), "Common").with_rarity(1).with_stats(1, 1, 1),
            CardTemplate::new(CardId::new(2), "Legend").with_rarity(4).with_stats(5, 9, 5),
            CardTemplate::new(CardId::new(3), "Shade")
                .with_element(Element::Dark)
                .with_stats(2, 2, 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_legal_deck() {
        let ruleset = Ruleset::new("R").with_deck_size(3, 5).with_max_copies(3);
        let deck = Deck::new("D", "R").with_copies(CardId::new(1), 3).with_copies(CardId::new(3), 1);

        let report = validate(&deck, &ruleset, &catalog());
        assert!(report.is_legal(), "{report}");
        assert_eq!(report.to_string(), "legal");
    }

    #[test]
    fn test_size_bounds() {
        let ruleset = Ruleset::new("R").with_deck_size(2, 3);

        let small = Deck::new("D", "R").with_copies(CardId::new(1), 1);
        assert_eq!(
            validate(&small, &ruleset, &catalog()).violations.as_slice(),
            &[Violation::TooFewCards { size: 1, min: 2 }]
        );

        let large = Deck::new("D", "R").with_copies(CardId::new(1), 4);
        assert_eq!(
            validate(&large, &ruleset, &catalog()).violations.as_slice(),
            &[Violation::TooManyCards { size: 4, max: 3 }]
        );
    }

    #[test]
    fn test_zero_means_unbounded() {
        let ruleset = Ruleset::new("R");
        let deck = Deck::new("D", "R").with_copies(CardId::new(1), 100);

        assert!(validate(&deck, &ruleset, &catalog()).is_legal());
    }

    #[test]
    fn test_restriction_tightens() {
        let ruleset = Ruleset::new("R")
            .with_max_copies(4)
            .with_restriction(CardFilter::rarity(4), 1);
        let deck = Deck::new("D", "R").with_copies(CardId::new(2), 2);

        let report = validate(&deck, &ruleset, &catalog());
        assert_eq!(
            report.violations.as_slice(),
            &[Violation::Restricted { card: CardId::new(2), count: 2, max: 1 }]
        );
    }

    #[test]
    fn test_filter_and_unknown() {
        let ruleset = Ruleset::new("No Dark")
            .with_filter(CardFilter::Not(Box::new(CardFilter::Element(Element::Dark))));
        let deck = Deck::new("D", "No Dark").with_cards([3, 99].map(CardId::new));

        let report = validate(&deck, &ruleset, &catalog());
        assert_eq!(
            report.violations.as_slice(),
            &[
                Violation::Filtered { card: CardId::new(3) },
                Violation::UnknownCard { card: CardId::new(99) },
            ]
        );
        assert!(report.to_string().contains("; "));
    }
}
