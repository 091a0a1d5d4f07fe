//! Match results.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Result of a finished duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// One side won.
    Winner(Side),
    /// Both sides were defeated in the same step.
    Tie,
    /// The turn limit ran out with both sides standing.
    Draw,
}

/// A finished duel from one participant's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    Win,
    Lose,
    Tie,
    Draw,
}

impl MatchResult {
    /// ```
    /// use card_duel::core::Side;
    /// use card_duel::rules::{MatchResult, Standing};
    ///
    /// let result = MatchResult::Winner(Side::Opponent);
    /// assert_eq!(result.standing_for(Side::Player), Standing::Lose);
    /// assert_eq!(result.standing_for(Side::Opponent), Standing::Win);
    /// ```
    #[must_use]
    pub fn standing_for(self, side: Side) -> Standing {
        match self {
            MatchResult::Winner(winner) if winner == side => Standing::Win,
            MatchResult::Winner(_) => Standing::Lose,
            MatchResult::Tie => Standing::Tie,
            MatchResult::Draw => Standing::Draw,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(self, side: Side) -> bool {
        self == MatchResult::Winner(side)
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Winner(side) => write!(f, "{side} wins"),
            MatchResult::Tie => f.write_str("tie"),
            MatchResult::Draw => f.write_str("draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing() {
        assert_eq!(MatchResult::Tie.standing_for(Side::Player), Standing::Tie);
        assert_eq!(MatchResult::Draw.standing_for(Side::Opponent), Standing::Draw);
        assert!(MatchResult::Winner(Side::Player).is_winner(Side::Player));
        assert!(!MatchResult::Tie.is_winner(Side::Player));
    }
}
