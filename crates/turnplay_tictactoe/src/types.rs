//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A side in the game, identified by its mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Parses a wire symbol (`"X"` or `"O"`, case-insensitive).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "X" | "x" => Some(Player::X),
            "O" | "o" => Some(Player::O),
            _ => None,
        }
    }

    /// Wire symbol for this player.
    pub fn symbol(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Wire symbol for this square; empty squares are the empty string.
    pub fn symbol(self) -> &'static str {
        match self {
            Square::Empty => "",
            Square::Occupied(player) => player.symbol(),
        }
    }
}

/// Error raised when a board cannot be rebuilt from wire symbols.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// The board did not have exactly nine cells.
    #[display("Board must have 9 cells, got {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// A cell held something other than `""`, `"X"` or `"O"`.
    #[display("Unknown symbol {:?} at cell {}", symbol, index)]
    UnknownSymbol {
        /// Cell index.
        index: usize,
        /// Offending symbol.
        symbol: String,
    },
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from its row-major squares.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Rebuilds a board from wire symbols (`""`, `"X"`, `"O"`).
    pub fn from_symbols<S: AsRef<str>>(cells: &[S]) -> Result<Self, BoardParseError> {
        if cells.len() != 9 {
            return Err(BoardParseError::WrongLength(cells.len()));
        }
        let mut squares = [Square::Empty; 9];
        for (index, cell) in cells.iter().enumerate() {
            let cell = cell.as_ref();
            squares[index] = if cell.trim().is_empty() {
                Square::Empty
            } else {
                let player = Player::from_symbol(cell).ok_or_else(|| BoardParseError::UnknownSymbol {
                    index,
                    symbol: cell.to_string(),
                })?;
                Square::Occupied(player)
            };
        }
        Ok(Self { squares })
    }

    /// Wire symbols for every cell, row-major.
    pub fn to_symbols(&self) -> Vec<String> {
        self.squares.iter().map(|s| s.symbol().to_string()).collect()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding the given mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
