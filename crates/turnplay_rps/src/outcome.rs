//! Round outcomes.

use super::Choice;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Seat {
    /// First player.
    #[display("Player 1")]
    One,
    /// Second player.
    #[display("Player 2")]
    Two,
}

impl Seat {
    /// The other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Array index for per-seat storage.
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

/// Result of a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// Seat one's choice dominates.
    #[display("Player 1 wins")]
    Player1Wins,
    /// Seat two's choice dominates.
    #[display("Player 2 wins")]
    Player2Wins,
    /// Both chose the same.
    #[display("Draw")]
    Draw,
}

impl Outcome {
    /// The winning seat, if any.
    pub fn winner(self) -> Option<Seat> {
        match self {
            Outcome::Player1Wins => Some(Seat::One),
            Outcome::Player2Wins => Some(Seat::Two),
            Outcome::Draw => None,
        }
    }
}

/// Resolves a round: Rock beats Scissors, Scissors beats Paper, Paper beats
/// Rock, equal choices draw.
#[instrument]
pub fn resolve(first: Choice, second: Choice) -> Outcome {
    if first == second {
        Outcome::Draw
    } else if first.beats() == second {
        Outcome::Player1Wins
    } else {
        Outcome::Player2Wins
    }
}
