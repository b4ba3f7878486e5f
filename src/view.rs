//! Read-only snapshots handed to the presentation layer.
//!
//! The core never touches presentation elements. After every state change a
//! session renders a snapshot into its [`ViewSink`]; the sink may draw it,
//! record it or drop it.

use crate::session::{Mode, SessionStatus};
use crate::session_id::SessionId;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use turnplay_rps::{Choice, Seat};
use turnplay_tictactoe::{Board, Player};

/// Receives a snapshot after every state change.
pub trait ViewSink<S>: Send {
    /// Called with the state as it is after the change.
    fn render(&mut self, snapshot: &S);
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl<S> ViewSink<S> for NullView {
    fn render(&mut self, _snapshot: &S) {}
}

/// Keeps every snapshot it receives. Clones share the same frame buffer.
#[derive(Debug, Clone)]
pub struct RecordingView<S> {
    frames: Arc<Mutex<Vec<S>>>,
}

impl<S> Default for RecordingView<S> {
    fn default() -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<S: Clone> RecordingView<S> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<S>> {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All frames rendered so far.
    pub fn frames(&self) -> Vec<S> {
        self.lock().clone()
    }

    /// Number of frames rendered so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True until the first frame arrives.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<S> {
        self.lock().last().cloned()
    }
}

impl<S: Clone + Send> ViewSink<S> for RecordingView<S> {
    fn render(&mut self, snapshot: &S) {
        self.lock().push(snapshot.clone());
    }
}

/// Tic-tac-toe state as the view sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Local or online.
    pub mode: Mode,
    /// Current board.
    pub board: Board,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Side allowed to move next.
    pub current_turn_owner: Player,
    /// Side this instance controls.
    pub local_side: Player,
    /// Whether local input would currently be accepted.
    pub is_my_turn: bool,
    /// Identifier shared with the peer, if any.
    pub session_id: Option<SessionId>,
}

impl SessionSnapshot {
    /// Status text for the status bar.
    pub fn status_line(&self) -> String {
        match self.status {
            SessionStatus::Pending => "Waiting for the game to start".to_string(),
            SessionStatus::Won(_) | SessionStatus::Draw => "Game over".to_string(),
            SessionStatus::Active => match self.mode {
                Mode::Local => format!("Turn: {}", self.current_turn_owner),
                Mode::Online if self.is_my_turn => format!("Your move ({})", self.local_side),
                Mode::Online => format!("Opponent's move ({})", self.local_side.opponent()),
            },
        }
    }
}

/// Rock-paper-scissors state as the view sees it.
///
/// Choices stay hidden until the round is resolved so a hotseat view cannot
/// leak the first player's pick to the second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSnapshot {
    /// Hotseat or simulated online.
    pub mode: Mode,
    /// Round status.
    pub status: crate::choice_session::ChoiceStatus,
    /// Seat expected to submit next (hotseat).
    pub turn_owner: Seat,
    /// Which seats have submitted.
    pub submitted: [bool; 2],
    /// Revealed choices, populated once resolved.
    pub revealed: Option<[Choice; 2]>,
}
