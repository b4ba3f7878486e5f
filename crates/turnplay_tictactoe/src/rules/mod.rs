//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are separated from
//! board storage so sessions can evaluate boards they received from a peer
//! as readily as boards they built locally.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use super::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board for terminal conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// No winning line and at least one empty square.
    Open,
    /// The player owns a complete line.
    Won(Player),
    /// Every square is occupied and nobody owns a line.
    Draw,
}

impl Verdict {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Verdict::Open)
    }
}

/// Evaluates a board. The win check strictly precedes the draw check, so a
/// full board containing a line is a win.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Verdict {
    if let Some(winner) = check_winner(board) {
        Verdict::Won(winner)
    } else if is_full(board) {
        Verdict::Draw
    } else {
        Verdict::Open
    }
}
