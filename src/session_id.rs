//! Six-digit session identifiers shared out-of-band between peers.

use crate::randomness::Randomness;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of digits in a session identifier.
pub const SESSION_ID_LEN: usize = 6;

/// Validated session identifier: exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Validates user input. Surrounding whitespace is trimmed first.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, SessionIdError> {
        let trimmed = input.trim();
        let len = trimmed.chars().count();
        if len != SESSION_ID_LEN {
            debug!(len, "Rejected session id with wrong length");
            return Err(SessionIdError::new(format!(
                "Please enter a valid {}-digit ID (got {} characters)",
                SESSION_ID_LEN, len
            )));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            debug!("Rejected session id with non-digit characters");
            return Err(SessionIdError::new(format!(
                "Please enter a valid {}-digit ID (digits only)",
                SESSION_ID_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Generates a fresh identifier for the session-creating side.
    #[instrument(skip(rng))]
    pub fn generate(rng: &mut dyn Randomness) -> Self {
        let digits: String = (0..SESSION_ID_LEN)
            .map(|_| char::from(b'0' + rng.pick(10) as u8))
            .collect();
        debug!(session_id = %digits, "Generated session id");
        Self(digits)
    }

    /// The digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = SessionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

/// Rejected session identifier, shown to the user before any transport action.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", message, file, line)]
pub struct SessionIdError {
    /// User-facing validation message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionIdError {
    /// Creates a new validation error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
