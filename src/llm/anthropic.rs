//! AnthropicProvider — [`LlmProvider`] implementation for the Anthropic
//! Messages API (`/v1/messages`).
//!
//! The API key is wrapped in [`secrecy::SecretString`] and only exposed when
//! constructing request headers; it never appears in Debug output or logs.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Role,
};

const PROVIDER: &str = "anthropic";

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    content: Vec<AnthropicContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

// ── Provider ────────────────────────────────────────────────────────────

/// Anthropic Claude provider.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model,
        }
    }

    /// Override the base URL (tests, proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic request into the Anthropic wire shape. System
    /// messages are hoisted into the `system` field; the messages array
    /// carries only user/assistant turns.
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        let system = {
            let parts: Vec<&str> = request
                .messages
                .iter()
                .filter(|m| m.role == Role::System)
                .map(|m| m.content.as_str())
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("\n\n"))
            }
        };

        let messages = request
            .messages
            .iter()
            .filter_map(|m| match m.role {
                Role::User => Some(AnthropicMessage {
                    role: "user",
                    content: m.content.clone(),
                }),
                Role::Assistant => Some(AnthropicMessage {
                    role: "assistant",
                    content: m.content.clone(),
                }),
                Role::System => None,
            })
            .collect();

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            messages,
            system,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn cost_per_token(&self) -> (Decimal, Decimal) {
        // USD per token. Haiku pricing; other models billed at Sonnet rates.
        if self.model.contains("haiku") {
            (dec!(0.000001), dec!(0.000005))
        } else {
            (dec!(0.000003), dec!(0.000015))
        }
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_anthropic_request(&request);
        let url = self.url("/v1/messages");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthFailed {
                    provider: PROVIDER.to_string(),
                },
                429 => LlmError::RateLimited {
                    provider: PROVIDER.to_string(),
                    retry_after,
                },
                _ => LlmError::RequestFailed {
                    provider: PROVIDER.to_string(),
                    reason: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: AnthropicResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!("failed to parse response body: {e}"),
            })?;

        let content = parsed
            .content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        let finish_reason = match parsed.stop_reason.as_deref() {
            Some("end_turn") => FinishReason::Stop,
            Some("max_tokens") => FinishReason::MaxTokens,
            Some("stop_sequence") => FinishReason::StopSequence,
            _ => FinishReason::Other,
        };

        Ok(CompletionResponse {
            content,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
            finish_reason,
            response_id: Some(parsed.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> AnthropicProvider {
        AnthropicProvider::new(
            SecretString::from("test-key-not-real"),
            "claude-haiku-4-5-20251001".to_string(),
        )
    }

    #[test]
    fn system_messages_are_hoisted() {
        let provider = make_provider();
        let request = CompletionRequest::new(vec![
            ChatMessage::system("Be Tosh."),
            ChatMessage::user("Hello"),
            ChatMessage::assistant("Hi there!"),
            ChatMessage::user("What do you do?"),
        ])
        .with_max_tokens(300);

        let wire = provider.to_anthropic_request(&request);
        assert_eq!(wire.system.as_deref(), Some("Be Tosh."));
        assert_eq!(wire.messages.len(), 3);
        assert_eq!(wire.messages[0].role, "user");
        assert_eq!(wire.messages[1].role, "assistant");
        assert_eq!(wire.max_tokens, 300);
    }

    #[test]
    fn no_system_field_without_system_message() {
        let provider = make_provider();
        let request = CompletionRequest::new(vec![ChatMessage::user("Hello")]);
        let wire = provider.to_anthropic_request(&request);
        assert!(wire.system.is_none());
    }

    #[test]
    fn haiku_pricing_is_cheaper_than_default() {
        let haiku = make_provider();
        let sonnet = AnthropicProvider::new(
            SecretString::from("test-key"),
            "claude-sonnet-4-20250514".to_string(),
        );
        assert!(haiku.cost_per_token().0 < sonnet.cost_per_token().0);
        assert!(haiku.cost_per_token().1 < sonnet.cost_per_token().1);
    }

    #[test]
    fn base_url_override() {
        let provider = make_provider().with_base_url("http://localhost:9000".to_string());
        assert_eq!(provider.url("/v1/messages"), "http://localhost:9000/v1/messages");
    }

    #[test]
    fn response_body_parses() {
        let json = r#"{
            "id": "msg_01",
            "content": [{"type": "text", "text": "Hello!"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 3}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, "msg_01");
        assert_eq!(parsed.usage.input_tokens, 12);
        assert!(matches!(
            parsed.content[0],
            AnthropicContentBlock::Text { .. }
        ));
    }
}
