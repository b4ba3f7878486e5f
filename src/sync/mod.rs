//! Peer synchronization for online tic-tac-toe.
//!
//! The transport is an opaque pipe of JSON text. [`SyncAdapter`] turns local
//! moves into outbound messages and inbound messages into session calls.
//! It assumes in-order, exactly-once delivery; nothing here reorders,
//! deduplicates or reconnects.

mod adapter;
mod messages;
mod transport;

pub use adapter::{PeerEvent, SyncAdapter, SyncError};
pub use messages::{DRAW_WINNER, InboundMessage, MoveBody, OutboundMessage};
pub use transport::{ChannelTransport, StdoutTransport, Transport, TransportError};
