//! Wire shapes exchanged with the peer.

use crate::session_id::SessionId;
use derive_new::new;
use serde::{Deserialize, Serialize};
use turnplay_tictactoe::Player;

/// `winner` value reported for a drawn game.
pub const DRAW_WINNER: &str = "draw";

/// Messages this instance sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// A local move.
    MakeMove {
        /// Shared session identifier.
        game_id: SessionId,
        /// The move itself.
        #[serde(rename = "move")]
        mv: MoveBody,
    },
    /// Request to join a session.
    JoinGame {
        /// Shared session identifier.
        game_id: SessionId,
        /// External identity, passed through untouched.
        user_id: Option<String>,
    },
}

/// Body of a `make_move` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveBody {
    /// Board index 0-8.
    pub index: usize,
    /// Mark placed.
    pub symbol: Player,
    /// External identity of the mover.
    pub player_id: Option<String>,
}

/// Messages the peer sends. Unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Starting state and, optionally, this instance's side.
    GameState {
        /// Side that moves first.
        current_player: Player,
        /// Side assigned to this instance by the peer handshake.
        #[serde(default)]
        symbol: Option<Player>,
        /// Starting board, when not empty.
        #[serde(default)]
        board: Option<Vec<String>>,
    },
    /// Authoritative board after a move.
    UpdateBoard {
        /// Nine cells: `""`, `"X"` or `"O"`.
        board: Vec<String>,
        /// Side that moves next.
        current_player: Player,
    },
    /// The game ended.
    GameOver {
        /// `"X"`, `"O"` or `"draw"`.
        winner: String,
    },
}
