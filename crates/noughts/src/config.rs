//! Session configuration.

use crate::mode::Mode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a [`Session`](crate::Session).
///
/// ```toml
/// reply_delay_ms = 500
/// mode = "human-vs-computer"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Pause before the computer answers, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,

    /// Mode the session starts in.
    #[serde(default)]
    mode: Mode,
}

fn default_reply_delay_ms() -> u64 {
    500
}

impl SessionConfig {
    /// Creates a configuration.
    pub fn new(reply_delay_ms: u64, mode: Mode) -> Self {
        Self { reply_delay_ms, mode }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            reply_delay_ms = config.reply_delay_ms,
            mode = %config.mode,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Replaces the reply delay.
    pub fn with_reply_delay_ms(mut self, reply_delay_ms: u64) -> Self {
        self.reply_delay_ms = reply_delay_ms;
        self
    }

    /// Replaces the starting mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Reply delay as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(default_reply_delay_ms(), Mode::default())
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
