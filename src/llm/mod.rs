//! LLM integration for Tosh Assist.
//!
//! The completion service is reached through the [`LlmProvider`] trait so the
//! gateway and tests never depend on a concrete transport. The only shipped
//! backend is Anthropic via the Messages API.

mod anthropic;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use provider::*;

use std::sync::Arc;

use crate::error::ConfigError;

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    Anthropic,
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, ConfigError> {
    match config.backend {
        LlmBackend::Anthropic => {
            tracing::info!(model = %config.model, "Using Anthropic");
            Ok(Arc::new(AnthropicProvider::new(
                config.api_key.clone(),
                config.model.clone(),
            )))
        }
    }
}
