//! Translation between session calls and peer messages.

use super::messages::{DRAW_WINNER, InboundMessage, MoveBody, OutboundMessage};
use super::transport::Transport;
use crate::session::{GameSession, Mode, SessionStatus};
use crate::session_id::SessionId;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};
use turnplay_tictactoe::{Board, BoardParseError, Move, Player};

/// An inbound message could not be applied.
#[derive(Debug, Display, Error)]
pub enum SyncError {
    /// Not valid JSON, or not a known message shape.
    #[display("Malformed peer message: {}", _0)]
    Malformed(serde_json::Error),
    /// The board did not parse.
    #[display("Invalid board from peer: {}", _0)]
    Board(BoardParseError),
    /// `game_over` named neither a side nor a draw.
    #[display("Unknown winner {:?}", _0)]
    UnknownWinner(#[error(not(source))] String),
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

impl From<BoardParseError> for SyncError {
    fn from(err: BoardParseError) -> Self {
        Self::Board(err)
    }
}

/// What an inbound message did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// The session was (re)started from the peer's state.
    Started {
        /// Side this instance plays.
        local_side: Player,
        /// Side that moves first.
        current_player: Player,
    },
    /// Board and turn owner were overwritten.
    BoardUpdated {
        /// Whether local input is now accepted.
        is_my_turn: bool,
    },
    /// The peer reported the end of the game.
    GameOver {
        /// Terminal status now held by the session.
        status: SessionStatus,
        /// Result text, e.g. `"X won!"` or `"Draw!"`.
        text: String,
    },
}

/// Boundary between a [`GameSession`] and a peer [`Transport`].
pub struct SyncAdapter {
    session_id: SessionId,
    user_id: Option<String>,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for SyncAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncAdapter")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl SyncAdapter {
    /// Creates an adapter for one session.
    pub fn new(session_id: SessionId, user_id: Option<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            session_id,
            user_id,
            transport,
        }
    }

    /// Shared session identifier.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Announces this instance to the peer. Returns false if the transport failed.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn join(&mut self) -> bool {
        let message = OutboundMessage::JoinGame {
            game_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
        };
        info!("Joining game");
        self.send(&message)
    }

    /// Applies local input and, in online mode, forwards the move to the peer.
    ///
    /// Ignored input sends nothing. A transport failure is logged and the
    /// local move stands.
    #[instrument(skip(self, session), fields(session_id = %self.session_id))]
    pub fn local_input(&mut self, session: &mut GameSession, index: usize) -> Option<Move> {
        let mv = session.apply_local_input(index)?;
        if session.mode() == Mode::Online {
            let message = OutboundMessage::MakeMove {
                game_id: self.session_id.clone(),
                mv: MoveBody::new(mv.position.to_index(), mv.player, self.user_id.clone()),
            };
            self.send(&message);
        }
        Some(mv)
    }

    /// Parses and dispatches one raw peer message.
    #[instrument(skip(self, session, raw), fields(session_id = %self.session_id, len = raw.len()))]
    pub fn on_peer_message(
        &mut self,
        session: &mut GameSession,
        raw: &str,
    ) -> Result<PeerEvent, SyncError> {
        let message: InboundMessage = serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, "Dropping malformed peer message");
            SyncError::from(e)
        })?;
        self.dispatch(session, message)
    }

    /// Dispatches an already-parsed peer message by kind.
    #[instrument(skip(self, session), fields(session_id = %self.session_id))]
    pub fn dispatch(
        &mut self,
        session: &mut GameSession,
        message: InboundMessage,
    ) -> Result<PeerEvent, SyncError> {
        match message {
            InboundMessage::GameState {
                current_player,
                symbol,
                board,
            } => {
                let board = match board {
                    Some(cells) => Board::from_symbols(&cells)?,
                    None => Board::new(),
                };
                session.start_from_peer(symbol, board, current_player);
                info!(local_side = %session.local_side(), %current_player, "Game started by peer");
                Ok(PeerEvent::Started {
                    local_side: session.local_side(),
                    current_player,
                })
            }
            InboundMessage::UpdateBoard {
                board,
                current_player,
            } => {
                let board = Board::from_symbols(&board)?;
                session.apply_remote_update(board, current_player);
                Ok(PeerEvent::BoardUpdated {
                    is_my_turn: session.is_my_turn(),
                })
            }
            InboundMessage::GameOver { winner } => {
                let winner = parse_winner(&winner)?;
                let status = session.force_outcome(winner);
                Ok(PeerEvent::GameOver {
                    status,
                    text: status.to_string(),
                })
            }
        }
    }

    fn send(&mut self, message: &OutboundMessage) -> bool {
        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize outbound message");
                return false;
            }
        };
        debug!(%payload, "Sending to peer");
        match self.transport.send(payload) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Transport failed, message dropped");
                false
            }
        }
    }
}

fn parse_winner(winner: &str) -> Result<Option<Player>, SyncError> {
    if winner.trim().eq_ignore_ascii_case(DRAW_WINNER) {
        return Ok(None);
    }
    Player::from_symbol(winner)
        .map(Some)
        .ok_or_else(|| SyncError::UnknownWinner(winner.to_string()))
}
