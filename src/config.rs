//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Model identifier for the completion service.
    pub model: String,
    /// Maximum tokens per assistant reply.
    pub max_reply_tokens: u32,
    /// Hard timeout on a single completion request. A hung upstream call
    /// resolves to the same fallback path as a failed one.
    pub request_timeout: Duration,
    /// Maximum number of history entries forwarded to the completion
    /// service per turn. The retained session history is not truncated.
    pub history_window: usize,
    /// Simulated typing delays before bot messages.
    pub typing: TypingDelays,
    /// HTTP/WS listen port.
    pub port: u16,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "claude-haiku-4-5-20251001".to_string(),
            max_reply_tokens: 300,
            request_timeout: Duration::from_secs(15),
            history_window: 40,
            typing: TypingDelays::default(),
            port: 8080,
        }
    }
}

impl AssistantConfig {
    /// Build configuration from `TOSH_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(model) = std::env::var("TOSH_MODEL") {
            config.model = model;
        }
        if let Ok(port) = std::env::var("TOSH_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TOSH_PORT".to_string(),
                message: format!("not a valid port: {port}"),
            })?;
        }
        if let Ok(secs) = std::env::var("TOSH_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TOSH_REQUEST_TIMEOUT_SECS".to_string(),
                message: format!("not a number: {secs}"),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(window) = std::env::var("TOSH_HISTORY_WINDOW") {
            config.history_window = window.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TOSH_HISTORY_WINDOW".to_string(),
                message: format!("not a number: {window}"),
            })?;
        }

        Ok(config)
    }
}

/// Simulated typing delays, applied by the channel before delivering each
/// bot message. The controller attaches these as data and never sleeps.
#[derive(Debug, Clone, Copy)]
pub struct TypingDelays {
    /// Before a slot prompt or gateway reply.
    pub prompt: Duration,
    /// Before an invalid-input re-prompt.
    pub retry: Duration,
    /// Before the lead summary message.
    pub summary: Duration,
    /// Between the summary and the closing confirmation (the closing lands
    /// 1.4s after the final answer).
    pub closing: Duration,
}

impl Default for TypingDelays {
    fn default() -> Self {
        Self {
            prompt: Duration::from_millis(600),
            retry: Duration::from_millis(400),
            summary: Duration::from_millis(600),
            closing: Duration::from_millis(800),
        }
    }
}

impl TypingDelays {
    /// Zero delays, for tests and non-interactive channels.
    pub fn none() -> Self {
        Self {
            prompt: Duration::ZERO,
            retry: Duration::ZERO,
            summary: Duration::ZERO,
            closing: Duration::ZERO,
        }
    }
}
