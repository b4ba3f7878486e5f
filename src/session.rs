//! Tic-tac-toe game session state machine.
//!
//! A [`GameSession`] owns the authoritative board, turn owner and status for
//! one game. Local input is validated and applied here; in online mode the
//! [`SyncAdapter`](crate::SyncAdapter) feeds peer state back in through
//! [`GameSession::apply_remote_update`].

use crate::randomness::Randomness;
use crate::session_id::SessionId;
use crate::view::{SessionSnapshot, ViewSink};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use turnplay_tictactoe::{Board, Move, Player, Position, Square, Verdict, evaluate};

/// How turn ownership and synchronization work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Both sides play on this instance; every turn is local.
    #[display("local")]
    Local,
    /// This instance controls one side; the other arrives from a peer.
    #[display("online")]
    Online,
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SessionStatus {
    /// Created but not started.
    #[display("Pending")]
    Pending,
    /// Moves are accepted.
    #[display("Active")]
    Active,
    /// The side completed a line.
    #[display("{} won!", _0)]
    Won(Player),
    /// Board full without a line.
    #[display("Draw!")]
    Draw,
}

impl SessionStatus {
    /// `Won` or `Draw`.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Won(_) | SessionStatus::Draw)
    }
}

/// One tic-tac-toe game.
pub struct GameSession {
    mode: Mode,
    board: Board,
    current_turn_owner: Player,
    local_side: Player,
    status: SessionStatus,
    session_id: Option<SessionId>,
    rng: Box<dyn Randomness>,
    view: Box<dyn ViewSink<SessionSnapshot>>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("mode", &self.mode)
            .field("board", &self.board)
            .field("current_turn_owner", &self.current_turn_owner)
            .field("local_side", &self.local_side)
            .field("status", &self.status)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a pending session. Nothing is accepted until [`start`](Self::start).
    pub fn new(rng: Box<dyn Randomness>, view: Box<dyn ViewSink<SessionSnapshot>>) -> Self {
        Self {
            mode: Mode::Local,
            board: Board::new(),
            current_turn_owner: Player::X,
            local_side: Player::X,
            status: SessionStatus::Pending,
            session_id: None,
            rng,
            view,
        }
    }

    /// Attaches the identifier shared with the peer.
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Starts a game on an empty board.
    ///
    /// The first mover is a fair coin flip. In online mode `assigned_side`
    /// comes from the peer handshake; without it the side is self-assigned
    /// by a second flip. In local mode the instance plays whichever side
    /// moves first.
    #[instrument(skip(self), fields(session_id = ?self.session_id))]
    pub fn start(&mut self, mode: Mode, assigned_side: Option<Player>) {
        let first = self.flip_side();
        self.begin(mode, assigned_side, Board::new(), first);
    }

    /// Starts an online game from the peer's opening state.
    ///
    /// Same as [`start`](Self::start) in online mode, except that the board
    /// and first mover come from the peer instead of a coin. The view sees a
    /// single frame.
    #[instrument(skip(self, board), fields(session_id = ?self.session_id))]
    pub fn start_from_peer(&mut self, assigned_side: Option<Player>, board: Board, first: Player) {
        self.begin(Mode::Online, assigned_side, board, first);
    }

    fn begin(&mut self, mode: Mode, assigned_side: Option<Player>, board: Board, first: Player) {
        self.mode = mode;
        self.board = board;
        self.current_turn_owner = first;
        self.local_side = match (mode, assigned_side) {
            (Mode::Online, Some(side)) => side,
            (Mode::Online, None) => self.flip_side(),
            (Mode::Local, _) => self.current_turn_owner,
        };
        self.status = SessionStatus::Active;
        info!(
            %mode,
            first = %self.current_turn_owner,
            local_side = %self.local_side,
            "Session started"
        );
        self.notify();
    }

    /// Applies local input at `index` (0-8).
    ///
    /// Invalid input is a silent no-op returning `None`: a finished or
    /// pending game, an online move out of turn, an occupied slot or an
    /// index off the board. On success the applied move is returned.
    #[instrument(skip(self), fields(session_id = ?self.session_id))]
    pub fn apply_local_input(&mut self, index: usize) -> Option<Move> {
        if self.status != SessionStatus::Active {
            debug!(status = %self.status, "Ignoring input, game not active");
            return None;
        }
        if self.mode == Mode::Online && self.current_turn_owner != self.local_side {
            debug!(turn = %self.current_turn_owner, "Ignoring input out of turn");
            return None;
        }
        let Some(position) = Position::from_index(index) else {
            debug!("Ignoring input off the board");
            return None;
        };
        if !self.board.is_empty(position) {
            debug!(%position, "Ignoring input on occupied square");
            return None;
        }

        let player = self.current_turn_owner;
        self.board.set(position, Square::Occupied(player));
        let status = self.evaluate_terminal();
        if status == SessionStatus::Active {
            self.current_turn_owner = player.opponent();
        }

        debug!(%player, %position, %status, "Move applied");
        self.notify();
        Some(Move::new(player, position))
    }

    /// Overwrites board and turn owner with the peer's authoritative values.
    ///
    /// Last write wins: no conflict detection and no ordering checks.
    /// Status is left alone; terminal results arrive separately.
    #[instrument(skip(self, board), fields(session_id = ?self.session_id))]
    pub fn apply_remote_update(&mut self, board: Board, turn_owner: Player) {
        self.board = board;
        self.current_turn_owner = turn_owner;
        debug!(is_my_turn = self.is_my_turn(), "Remote update applied");
        self.notify();
    }

    /// Checks the board for a win, then for a draw.
    ///
    /// Terminal statuses are absorbing; a session that is already won or
    /// drawn keeps its status.
    #[instrument(skip(self))]
    pub fn evaluate_terminal(&mut self) -> SessionStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        match evaluate(&self.board) {
            Verdict::Won(player) => {
                info!(winner = %player, "Game won");
                self.status = SessionStatus::Won(player);
            }
            Verdict::Draw => {
                info!("Game drawn");
                self.status = SessionStatus::Draw;
            }
            Verdict::Open => {}
        }
        self.status
    }

    /// Sets the terminal result reported by the peer. `None` means a draw.
    #[instrument(skip(self), fields(session_id = ?self.session_id))]
    pub fn force_outcome(&mut self, winner: Option<Player>) -> SessionStatus {
        self.status = match winner {
            Some(player) => SessionStatus::Won(player),
            None => SessionStatus::Draw,
        };
        info!(status = %self.status, "Outcome reported by peer");
        self.notify();
        self.status
    }

    /// Starts over on an empty board with a fresh first mover.
    ///
    /// In online mode the local side is re-drawn from the same flip and the
    /// peer is not told; both instances may end up claiming the same side.
    /// A session that was never started stays pending.
    #[instrument(skip(self), fields(session_id = ?self.session_id))]
    pub fn reset(&mut self) {
        if self.status == SessionStatus::Pending {
            debug!("Ignoring reset, game not started");
            return;
        }
        self.board = Board::new();
        self.status = SessionStatus::Active;
        self.current_turn_owner = self.flip_side();
        self.local_side = self.current_turn_owner;
        if self.mode == Mode::Online {
            warn!(
                local_side = %self.local_side,
                "Online reset re-assigned the local side without notifying the peer"
            );
        }
        info!(first = %self.current_turn_owner, "Session reset");
        self.notify();
    }

    /// Whether local input would be accepted right now.
    pub fn is_my_turn(&self) -> bool {
        self.status == SessionStatus::Active
            && (self.mode == Mode::Local || self.current_turn_owner == self.local_side)
    }

    /// Read-only copy of the state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            board: self.board.clone(),
            status: self.status,
            current_turn_owner: self.current_turn_owner,
            local_side: self.local_side,
            is_my_turn: self.is_my_turn(),
            session_id: self.session_id.clone(),
        }
    }

    /// Local or online.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side allowed to move next.
    pub fn current_turn_owner(&self) -> Player {
        self.current_turn_owner
    }

    /// Side this instance controls.
    pub fn local_side(&self) -> Player {
        self.local_side
    }

    /// Lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Identifier shared with the peer.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    fn flip_side(&mut self) -> Player {
        if self.rng.coin_flip() { Player::X } else { Player::O }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.view.render(&snapshot);
    }
}
