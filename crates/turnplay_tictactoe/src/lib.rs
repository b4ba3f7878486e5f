//! Pure tic-tac-toe rules.
//!
//! This crate knows nothing about sessions, turn ownership across peers or
//! transports. It provides the board, the marks, the nine positions and the
//! rule engine that decides whether a board is won, drawn or still open.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod position;
pub mod rules;
mod types;

pub use action::Move;
pub use position::Position;
pub use rules::{Verdict, check_winner, evaluate, is_full};
pub use types::{Board, BoardParseError, Player, Square};
