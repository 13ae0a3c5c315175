//! Decisions and the rock–scissors–paper resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A decision thrown by a player for a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Rock,
    Scissors,
    Paper,
}

/// Result of resolving two decisions against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    FirstWins,
    SecondWins,
    Tie,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Rock, Decision::Scissors, Decision::Paper];

    /// The decision this one defeats.
    pub const fn beats(self) -> Decision {
        match self {
            Decision::Rock => Decision::Scissors,
            Decision::Scissors => Decision::Paper,
            Decision::Paper => Decision::Rock,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Decision::Rock => "Rock",
            Decision::Scissors => "Scissors",
            Decision::Paper => "Paper",
        };
        f.write_str(name)
    }
}

impl Outcome {
    /// Same outcome seen from the other side.
    pub const fn flipped(self) -> Outcome {
        match self {
            Outcome::FirstWins => Outcome::SecondWins,
            Outcome::SecondWins => Outcome::FirstWins,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// Resolve `first` against `second` using the fixed three-element cycle.
pub fn resolve(first: Decision, second: Decision) -> Outcome {
    if first == second {
        Outcome::Tie
    } else if first.beats() == second {
        Outcome::FirstWins
    } else {
        Outcome::SecondWins
    }
}
