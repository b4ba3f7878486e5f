//! Turnplay - turn-based game sessions with optional peer sync.
//!
//! The crate holds the state machines behind two small games and the
//! boundary that keeps an online tic-tac-toe game consistent with a peer.
//! Presentation is somebody else's job: sessions render read-only
//! snapshots into a [`ViewSink`] and take input through plain method calls.
//!
//! # Architecture
//!
//! - **Rules**: [`turnplay_tictactoe`] and [`turnplay_rps`] (pure crates)
//! - **Sessions**: [`GameSession`] and [`ChoiceGameSession`]
//! - **Sync**: [`SyncAdapter`] translating session calls to peer messages
//! - **Opponent**: [`OpponentScheduler`] for the simulated online choice game
//!
//! # Example
//!
//! ```
//! use turnplay::{GameSession, Mode, NullView, ScriptedRandomness, SessionStatus};
//!
//! let mut session = GameSession::new(
//!     Box::new(ScriptedRandomness::flips([true])),
//!     Box::new(NullView),
//! );
//! session.start(Mode::Local, None);
//! for index in [0, 3, 1, 4, 2] {
//!     session.apply_local_input(index);
//! }
//! assert!(matches!(session.status(), SessionStatus::Won(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod choice_session;
mod config;
mod opponent;
mod randomness;
mod scoreboard;
mod session;
mod session_id;
mod sync;
mod view;

// Crate-level exports - Sessions
pub use choice_session::{ChoiceGameSession, ChoiceStatus, LOCAL_SEAT, PendingOpponent, Submission};
pub use session::{GameSession, Mode, SessionStatus};

// Crate-level exports - Session identifiers
pub use session_id::{SESSION_ID_LEN, SessionId, SessionIdError};

// Crate-level exports - Randomness
pub use randomness::{Randomness, RngRandomness, ScriptedRandomness};

// Crate-level exports - View
pub use view::{ChoiceSnapshot, NullView, RecordingView, SessionSnapshot, ViewSink};

// Crate-level exports - Synthetic opponent
pub use opponent::{OpponentReply, OpponentScheduler, OpponentStrategy, RandomOpponent};

// Crate-level exports - Peer sync
pub use sync::{
    ChannelTransport, DRAW_WINNER, InboundMessage, MoveBody, OutboundMessage, PeerEvent,
    StdoutTransport, SyncAdapter, SyncError, Transport, TransportError,
};

// Crate-level exports - Scoreboard and config
pub use config::{ConfigError, GameConfig, USER_ID_ENV};
pub use scoreboard::{GameResult, HOTSEAT_SIDE, Scoreboard};

// Crate-level exports - Game types
pub use turnplay_rps::{Choice, Outcome, Seat, resolve};
pub use turnplay_tictactoe::{Board, Move, Player, Position, Square, Verdict, evaluate};
