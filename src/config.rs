//! Runtime configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured user id.
pub const USER_ID_ENV: &str = "TURNPLAY_USER_ID";

/// Game configuration, usually read from `turnplay.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Delay before the simulated opponent answers, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Peer endpoint, shown to the user; transports decide how to reach it.
    #[serde(default = "default_peer_url")]
    peer_url: String,

    /// External identity passed through on join.
    #[serde(default)]
    user_id: Option<String>,

    /// Seed for reproducible games.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_opponent_delay_ms() -> u64 {
    1000
}

#[instrument]
fn default_peer_url() -> String {
    "ws://localhost:8765".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: default_opponent_delay_ms(),
            peer_url: default_peer_url(),
            user_id: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(delay_ms = config.opponent_delay_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, defaults otherwise, then applies environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env())
    }

    /// Applies `TURNPLAY_USER_ID` when set and non-empty.
    pub fn apply_env(self) -> Self {
        match std::env::var(USER_ID_ENV) {
            Ok(user_id) if !user_id.trim().is_empty() => {
                debug!("User id taken from environment");
                self.with_user_id(Some(user_id.trim().to_string()))
            }
            _ => self,
        }
    }

    /// Opponent delay as a duration.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
