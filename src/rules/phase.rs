//! Turn phases.

use serde::{Deserialize, Serialize};

/// A phase of the duel's turn cycle.
///
/// `Start` runs once. `Upkeep` through `End` loop until a victory
/// condition moves the duel to `Finished`, which is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Start,
    Upkeep,
    Draw,
    Main,
    Battle,
    End,
    Finished,
}

impl Phase {
    /// The phase that follows when no victory condition fires.
    ///
    /// ```
    /// use card_duel::rules::Phase;
    ///
    /// assert_eq!(Phase::Start.next(), Phase::Upkeep);
    /// assert_eq!(Phase::End.next(), Phase::Upkeep);
    /// assert_eq!(Phase::Finished.next(), Phase::Finished);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::Start => Phase::Upkeep,
            Phase::Upkeep => Phase::Draw,
            Phase::Draw => Phase::Main,
            Phase::Main => Phase::Battle,
            Phase::Battle => Phase::End,
            Phase::End => Phase::Upkeep,
            Phase::Finished => Phase::Finished,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Finished)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::Upkeep => "upkeep",
            Phase::Draw => "draw",
            Phase::Main => "main",
            Phase::Battle => "battle",
            Phase::End => "end",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}
