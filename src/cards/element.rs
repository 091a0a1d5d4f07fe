//! Card elements and their dominance cycle.
//!
//! ```text
//!   Fire ──beats──▶ Wind ──beats──▶ Earth ──beats──▶ Water ──beats──▶ Fire
//!   Light ◀──mutual defeat──▶ Dark
//! ```

use serde::{Deserialize, Serialize};

/// Element of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[default]
    None,
    Fire,
    Water,
    Earth,
    Wind,
    Light,
    Dark,
}

/// Result of comparing two elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementMatchup {
    /// The first element dominates the second.
    Advantage,
    /// The second element dominates the first.
    Disadvantage,
    /// Light against Dark: both are defeated.
    MutualDefeat,
    /// Elements do not decide this matchup.
    Neutral,
}

impl Element {
    /// Every element, `None` first.
    pub const ALL: [Element; 7] = [
        Element::None,
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Wind,
        Element::Light,
        Element::Dark,
    ];

    /// The classic element this one defeats, if any.
    #[must_use]
    pub const fn beats(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Wind),
            Element::Water => Some(Element::Fire),
            Element::Earth => Some(Element::Water),
            Element::Wind => Some(Element::Earth),
            Element::None | Element::Light | Element::Dark => None,
        }
    }

    /// The classic element that defeats this one, if any.
    #[must_use]
    pub const fn beaten_by(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Water),
            Element::Water => Some(Element::Earth),
            Element::Earth => Some(Element::Wind),
            Element::Wind => Some(Element::Fire),
            Element::None | Element::Light | Element::Dark => None,
        }
    }

    /// Compare this element against an opposing one.
    ///
    /// ```
    /// use card_duel::cards::{Element, ElementMatchup};
    ///
    /// assert_eq!(Element::Fire.matchup(Element::Wind), ElementMatchup::Advantage);
    /// assert_eq!(Element::Fire.matchup(Element::Water), ElementMatchup::Disadvantage);
    /// assert_eq!(Element::Light.matchup(Element::Dark), ElementMatchup::MutualDefeat);
    /// assert_eq!(Element::Fire.matchup(Element::Earth), ElementMatchup::Neutral);
    /// ```
    #[must_use]
    pub fn matchup(self, other: Element) -> ElementMatchup {
        match (self, other) {
            (Element::Light, Element::Dark) | (Element::Dark, Element::Light) => {
                ElementMatchup::MutualDefeat
            }
            _ if self.beats() == Some(other) => ElementMatchup::Advantage,
            _ if other.beats() == Some(self) => ElementMatchup::Disadvantage,
            _ => ElementMatchup::Neutral,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::None => "None",
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Wind => "Wind",
            Element::Light => "Light",
            Element::Dark => "Dark",
        };
        f.write_str(name)
    }
}
