//! Pile identifiers.
//!
//! Each participant has four named piles and 26 custom piles addressed by
//! letter. Custom piles behave exactly like the named ones; the letter is
//! only a namespace.

use serde::{Deserialize, Serialize};

use crate::error::BattleError;

/// Letter of a custom pile, `A` through `Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct PileLetter(u8);

impl PileLetter {
    /// Number of custom piles.
    pub const COUNT: usize = 26;

    /// Create a letter from a character.
    ///
    /// Lowercase letters are accepted and normalised. Anything outside
    /// A-Z is a scripting bug and is rejected.
    ///
    /// ```
    /// use card_duel::zones::PileLetter;
    ///
    /// assert_eq!(PileLetter::new('c').unwrap().as_char(), 'C');
    /// assert!(PileLetter::new('7').is_err());
    /// ```
    pub fn new(letter: char) -> Result<Self, BattleError> {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Ok(Self(upper as u8 - b'A'))
        } else {
            Err(BattleError::InvalidPileLetter(letter))
        }
    }

    /// The letter as an uppercase character.
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// Position of the letter in the alphabet (A = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All 26 letters in order.
    pub fn all() -> impl Iterator<Item = PileLetter> {
        (0..Self::COUNT as u8).map(PileLetter)
    }
}

impl TryFrom<char> for PileLetter {
    type Error = BattleError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Self::new(letter)
    }
}

impl From<PileLetter> for char {
    fn from(letter: PileLetter) -> Self {
        letter.as_char()
    }
}

/// A pile owned by one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileId {
    /// Draw deck. Top is the end of the sequence.
    Library,
    Hand,
    Discard,
    /// Removed from play, never recycled by the engine.
    Exhaust,
    Custom(PileLetter),
}

impl PileId {
    /// Number of piles per participant.
    pub const COUNT: usize = 4 + PileLetter::COUNT;

    /// Dense index for array storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PileId::Library => 0,
            PileId::Hand => 1,
            PileId::Discard => 2,
            PileId::Exhaust => 3,
            PileId::Custom(letter) => 4 + letter.index(),
        }
    }

    /// Custom pile by letter.
    pub fn custom(letter: char) -> Result<Self, BattleError> {
        PileLetter::new(letter).map(PileId::Custom)
    }

    /// Every pile, named piles first.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Library, PileId::Hand, PileId::Discard, PileId::Exhaust]
            .into_iter()
            .chain(PileLetter::all().map(PileId::Custom))
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileId::Library => write!(f, "library"),
            PileId::Hand => write!(f, "hand"),
            PileId::Discard => write!(f, "discard"),
            PileId::Exhaust => write!(f, "exhaust"),
            PileId::Custom(letter) => write!(f, "pile {}", letter.as_char()),
        }
    }
}
