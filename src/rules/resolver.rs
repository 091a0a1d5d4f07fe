//! Battle resolution.
//!
//! `resolve` compares two battle cards through a fixed chain of checks
//! and stops at the first one that decides:
//!
//! 1. Element dominance (Light and Dark defeat each other)
//! 2. Level
//! 3. Power
//! 4. Health, only when enabled in `ResolverOptions`
//!
//! Resolution is pure. Damage and pile moves are applied by the sequencer.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardStats, Element, ElementMatchup};

/// Result for the card on the left-hand side of `resolve`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Win,
    Lose,
    Tie,
    /// Both cards are defeated (double K.O.). Not a Tie: both sides
    /// take battle damage.
    MutualLoss,
}

impl Verdict {
    /// The same verdict seen from the other card.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Verdict::Win => Verdict::Lose,
            Verdict::Lose => Verdict::Win,
            other => other,
        }
    }
}

/// Which check decided a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    Element,
    Level,
    Power,
    Health,
    /// Nothing decided it, or the battle was uncontested.
    None,
}

/// Verdict plus the deciding criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub verdict: Verdict,
    pub decided_by: Criterion,
}

impl BattleOutcome {
    #[must_use]
    pub const fn new(verdict: Verdict, decided_by: Criterion) -> Self {
        Self { verdict, decided_by }
    }

    /// Outcome for a card that faced no opponent.
    #[must_use]
    pub const fn uncontested() -> Self {
        Self::new(Verdict::Win, Criterion::None)
    }

    /// The outcome from the other card's perspective.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.verdict.flipped(), self.decided_by)
    }
}

/// House rules that affect resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Compare health after level and power.
    pub health_check: bool,
}

/// Resolve a battle from `a`'s perspective.
///
/// ```
/// use card_duel::cards::{Card, CardId, CardTemplate, Element};
/// use card_duel::core::{EntityId, Side};
/// use card_duel::rules::{resolve, Criterion, ResolverOptions, Verdict};
///
/// let fire = CardTemplate::new(CardId::new(1), "Ember").with_element(Element::Fire).with_stats(3, 1, 1);
/// let wind = CardTemplate::new(CardId::new(2), "Gust").with_element(Element::Wind).with_stats(1, 9, 1);
/// let a = Card::from_template(EntityId(0), &fire, Side::Player);
/// let b = Card::from_template(EntityId(1), &wind, Side::Opponent);
///
/// let outcome = resolve(&a, &b, &ResolverOptions::default());
/// assert_eq!(outcome.verdict, Verdict::Win);
/// assert_eq!(outcome.decided_by, Criterion::Element);
/// ```
#[must_use]
pub fn resolve(a: &Card, b: &Card, options: &ResolverOptions) -> BattleOutcome {
    resolve_stats(a.element, a.stats, b.element, b.stats, options)
}

/// `resolve` on raw attributes, for comparing cards that are not in play.
#[must_use]
pub fn resolve_stats(
    a_element: Element,
    a: CardStats,
    b_element: Element,
    b: CardStats,
    options: &ResolverOptions,
) -> BattleOutcome {
    match a_element.matchup(b_element) {
        ElementMatchup::Advantage => return BattleOutcome::new(Verdict::Win, Criterion::Element),
        ElementMatchup::Disadvantage => return BattleOutcome::new(Verdict::Lose, Criterion::Element),
        ElementMatchup::MutualDefeat => return BattleOutcome::new(Verdict::MutualLoss, Criterion::Element),
        ElementMatchup::Neutral => {}
    }

    let checks = [
        (a.level, b.level, Criterion::Level),
        (a.power, b.power, Criterion::Power),
        (a.health, b.health, Criterion::Health),
    ];

    checks
        .into_iter()
        .take(if options.health_check { 3 } else { 2 })
        .find(|(x, y, _)| x != y)
        .map_or(BattleOutcome::new(Verdict::Tie, Criterion::None), |(x, y, criterion)| {
            let verdict = if x > y { Verdict::Win } else { Verdict::Lose };
            BattleOutcome::new(verdict, criterion)
        })
}
