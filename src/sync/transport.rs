//! Outbound transports.

use derive_more::{Display, Error};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::instrument;

/// Delivers serialized messages to the peer.
///
/// Connection setup and teardown belong to the implementation, not to the
/// adapter that calls it.
pub trait Transport: Send {
    /// Sends one serialized message.
    fn send(&mut self, payload: String) -> Result<(), TransportError>;
}

/// Transport failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for TransportError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("IO error: {}", err))
    }
}

/// Hands payloads to an in-process channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    /// Creates a transport and the receiving end of its channel.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, payload: String) -> Result<(), TransportError> {
        self.tx
            .send(payload)
            .map_err(|_| TransportError::new("Peer channel closed"))
    }
}

/// Writes one JSON message per line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTransport;

impl Transport for StdoutTransport {
    fn send(&mut self, payload: String) -> Result<(), TransportError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", payload)?;
        stdout.flush()?;
        Ok(())
    }
}
