//! In-memory win/loss tally for the local player.

use crate::session::SessionStatus;
use derive_getters::Getters;
use serde::Serialize;
use tracing::{info, instrument};
use turnplay_rps::{Outcome, Seat};
use turnplay_tictactoe::Player;

/// Mark whose results a hotseat tic-tac-toe tally follows.
pub const HOTSEAT_SIDE: Player = Player::X;

/// Result of one finished game from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum GameResult {
    /// Local player won.
    Win,
    /// Local player lost.
    Loss,
    /// Nobody won.
    Draw,
}

/// Running totals across games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize)]
pub struct Scoreboard {
    /// Finished games.
    games_played: u32,
    /// Games won.
    wins: u32,
    /// Games lost.
    losses: u32,
    /// Games drawn.
    draws: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished game.
    #[instrument(skip(self))]
    pub fn record(&mut self, result: GameResult) {
        self.games_played += 1;
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
        info!(games_played = self.games_played, %result, "Result recorded");
    }

    /// Counts a tic-tac-toe result for `local_side`. Non-terminal statuses are not counted.
    pub fn record_tictactoe(&mut self, status: SessionStatus, local_side: Player) -> Option<GameResult> {
        let result = match status {
            SessionStatus::Won(winner) if winner == local_side => GameResult::Win,
            SessionStatus::Won(_) => GameResult::Loss,
            SessionStatus::Draw => GameResult::Draw,
            SessionStatus::Pending | SessionStatus::Active => return None,
        };
        self.record(result);
        Some(result)
    }

    /// Counts a hotseat tic-tac-toe result. Both sides sit at this
    /// instance, so wins and losses are X's, whoever moved first.
    pub fn record_hotseat(&mut self, status: SessionStatus) -> Option<GameResult> {
        self.record_tictactoe(status, HOTSEAT_SIDE)
    }

    /// Counts a rock-paper-scissors result for `local_seat`.
    pub fn record_choice(&mut self, outcome: Outcome, local_seat: Seat) -> GameResult {
        let result = match outcome.winner() {
            Some(seat) if seat == local_seat => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        };
        self.record(result);
        result
    }

    /// One-line summary for the terminal.
    pub fn summary(&self) -> String {
        format!(
            "Played: {}  Wins: {}  Losses: {}  Draws: {}",
            self.games_played, self.wins, self.losses, self.draws
        )
    }
}
