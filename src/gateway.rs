//! Completion Gateway — the assistant's one seam to the hosted LLM.
//!
//! Submits windowed conversation history with the persona prompt, parses the
//! `[SUGGEST_CONSULTATION]` control token out of replies, and converts every
//! failure mode (missing credentials, transport error, API error, timeout)
//! into a fixed fallback reply. Callers never see an error.

use std::sync::Arc;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use rust_decimal::Decimal;

use crate::config::AssistantConfig;
use crate::conversation::message::HistoryEntry;
use crate::knowledge;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider, Role};

/// Control token the completion service appends to signal a booking
/// call-to-action. Must stay in sync with the instruction in
/// [`knowledge::system_prompt`].
pub const CONSULTATION_TOKEN: &str = "[SUGGEST_CONSULTATION]";

/// Reply when no API credential is configured.
pub const NOT_CONFIGURED_REPLY: &str = "I'm having trouble connecting right now. Please try again later or contact us at info@jtldinc.com.";

/// Reply when the upstream call fails or times out.
pub const FALLBACK_REPLY: &str = "I'm having a little trouble right now. You can reach our team at info@jtldinc.com or call (416) 555-1234.";

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[SUGGEST_CONSULTATION\]\s*").expect("valid token pattern"));

/// Outcome of a gateway call.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    /// Visible reply text, control token stripped.
    pub text: String,
    /// Whether the service signaled a booking call-to-action.
    pub suggest_consultation: bool,
    /// True when this is a static degraded reply rather than model output.
    /// Fallback replies are excluded from the retained history.
    pub is_fallback: bool,
}

impl GatewayReply {
    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            suggest_consultation: false,
            is_fallback: true,
        }
    }
}

/// Gateway to the hosted completion service.
pub struct CompletionGateway {
    provider: Option<Arc<dyn LlmProvider>>,
    system_prompt: String,
    max_reply_tokens: u32,
    request_timeout: Duration,
    history_window: usize,
}

impl CompletionGateway {
    /// Create a gateway. `provider` is `None` when no credential is
    /// configured; every call then degrades to the static reply.
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, config: &AssistantConfig) -> Self {
        Self {
            provider,
            system_prompt: knowledge::system_prompt(),
            max_reply_tokens: config.max_reply_tokens,
            request_timeout: config.request_timeout,
            history_window: config.history_window,
        }
    }

    /// Complete a turn: append `user_text` to `prior` and submit.
    pub async fn complete(&self, user_text: &str, prior: &[HistoryEntry]) -> GatewayReply {
        let mut history: Vec<HistoryEntry> = prior.to_vec();
        history.push(HistoryEntry::user(user_text));
        self.complete_history(&history).await
    }

    /// Complete against a full history whose last entry is the pending user
    /// message. Only the trailing `history_window` entries are forwarded, so
    /// long sessions keep a bounded request payload.
    pub async fn complete_history(&self, history: &[HistoryEntry]) -> GatewayReply {
        let Some(provider) = &self.provider else {
            tracing::warn!("completion requested but no provider is configured");
            return GatewayReply::fallback(NOT_CONFIGURED_REPLY);
        };

        let window_start = history.len().saturating_sub(self.history_window);
        let mut messages = vec![ChatMessage::system(&self.system_prompt)];
        messages.extend(history[window_start..].iter().map(ChatMessage::from));

        let request = CompletionRequest::new(messages).with_max_tokens(self.max_reply_tokens);

        let response = match tokio::time::timeout(self.request_timeout, provider.complete(request))
            .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "completion request failed, degrading to fallback");
                return GatewayReply::fallback(FALLBACK_REPLY);
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.request_timeout.as_secs(),
                    "completion request timed out, degrading to fallback"
                );
                return GatewayReply::fallback(FALLBACK_REPLY);
            }
        };

        let (in_price, out_price) = provider.cost_per_token();
        let cost = Decimal::from(response.input_tokens) * in_price
            + Decimal::from(response.output_tokens) * out_price;
        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            estimated_cost_usd = %cost,
            "completion ok"
        );

        let (text, suggest_consultation) = parse_reply(&response.content);
        GatewayReply {
            text,
            suggest_consultation,
            is_fallback: false,
        }
    }
}

/// Strip the control token and report whether it was present.
fn parse_reply(raw: &str) -> (String, bool) {
    let suggest = raw.contains(CONSULTATION_TOKEN);
    let cleaned = TOKEN_PATTERN.replace_all(raw, "").trim().to_string();
    let text = if cleaned.is_empty() {
        "I'm having trouble responding right now.".to_string()
    } else {
        cleaned
    };
    (text, suggest)
}

/// Helper for the REST endpoint: does the last entry look like a pending
/// user turn?
pub fn ends_with_user_turn(history: &[HistoryEntry]) -> bool {
    history.last().is_some_and(|entry| entry.role == Role::User)
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::error::LlmError;
    use crate::llm::{CompletionResponse, FinishReason};

    /// Stub provider with a canned outcome.
    struct StubLlm {
        reply: Result<String, ()>,
        delay: Duration,
    }

    impl StubLlm {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                delay: Duration::ZERO,
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                delay: Duration::ZERO,
            }
        }

        fn slow(reply: &str, delay: Duration) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                delay,
            }
        }
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        fn model_name(&self) -> &str {
            "stub"
        }

        fn cost_per_token(&self) -> (Decimal, Decimal) {
            (dec!(0), dec!(0))
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            if self.delay > Duration::ZERO {
                tokio::time::sleep(self.delay).await;
            }
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    content: content.clone(),
                    input_tokens: 10,
                    output_tokens: 5,
                    finish_reason: FinishReason::Stop,
                    response_id: None,
                }),
                Err(()) => Err(LlmError::RequestFailed {
                    provider: "stub".to_string(),
                    reason: "simulated network error".to_string(),
                }),
            }
        }
    }

    fn gateway_with(provider: StubLlm) -> CompletionGateway {
        CompletionGateway::new(Some(Arc::new(provider)), &AssistantConfig::default())
    }

    #[test]
    fn parse_reply_strips_trailing_token() {
        let (text, suggest) = parse_reply("Happy to help you book! [SUGGEST_CONSULTATION]");
        assert_eq!(text, "Happy to help you book!");
        assert!(suggest);
    }

    #[test]
    fn parse_reply_strips_inline_token() {
        let (text, suggest) = parse_reply("before [SUGGEST_CONSULTATION] after");
        assert_eq!(text, "beforeafter");
        assert!(suggest);
    }

    #[test]
    fn parse_reply_without_token() {
        let (text, suggest) = parse_reply("We offer six service areas.");
        assert_eq!(text, "We offer six service areas.");
        assert!(!suggest);
    }

    #[test]
    fn parse_reply_token_only_yields_placeholder() {
        let (text, suggest) = parse_reply("[SUGGEST_CONSULTATION]");
        assert_eq!(text, "I'm having trouble responding right now.");
        assert!(suggest);
    }

    #[tokio::test]
    async fn success_returns_model_text() {
        let gateway = gateway_with(StubLlm::ok("Hello from the model."));
        let reply = gateway.complete("hi", &[]).await;
        assert_eq!(reply.text, "Hello from the model.");
        assert!(!reply.suggest_consultation);
        assert!(!reply.is_fallback);
    }

    #[tokio::test]
    async fn provider_error_degrades_to_fallback() {
        let gateway = gateway_with(StubLlm::failing());
        let reply = gateway.complete("hi", &[]).await;
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert!(reply.text.contains("info@jtldinc.com"));
        assert!(!reply.suggest_consultation);
        assert!(reply.is_fallback);
    }

    #[tokio::test]
    async fn missing_provider_degrades_to_not_configured() {
        let gateway = CompletionGateway::new(None, &AssistantConfig::default());
        let reply = gateway.complete("hi", &[]).await;
        assert_eq!(reply.text, NOT_CONFIGURED_REPLY);
        assert!(reply.is_fallback);
    }

    #[tokio::test]
    async fn slow_provider_times_out_to_fallback() {
        let config = AssistantConfig {
            request_timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let provider = StubLlm::slow("too late", Duration::from_secs(5));
        let gateway = CompletionGateway::new(Some(Arc::new(provider)), &config);
        let reply = gateway.complete("hi", &[]).await;
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert!(reply.is_fallback);
    }

    #[tokio::test]
    async fn history_is_windowed_before_forwarding() {
        // Capture the message count the provider actually sees.
        struct Counting {
            seen: std::sync::Mutex<usize>,
        }

        #[async_trait]
        impl LlmProvider for Counting {
            fn model_name(&self) -> &str {
                "counting"
            }
            fn cost_per_token(&self) -> (Decimal, Decimal) {
                (dec!(0), dec!(0))
            }
            async fn complete(
                &self,
                request: CompletionRequest,
            ) -> Result<CompletionResponse, LlmError> {
                *self.seen.lock().unwrap() = request.messages.len();
                Ok(CompletionResponse {
                    content: "ok".to_string(),
                    input_tokens: 0,
                    output_tokens: 0,
                    finish_reason: FinishReason::Stop,
                    response_id: None,
                })
            }
        }

        let provider = Arc::new(Counting {
            seen: std::sync::Mutex::new(0),
        });
        let config = AssistantConfig {
            history_window: 4,
            ..Default::default()
        };
        let gateway = CompletionGateway::new(Some(provider.clone()), &config);

        let mut prior = Vec::new();
        for i in 0..10 {
            prior.push(HistoryEntry::user(format!("q{i}")));
            prior.push(HistoryEntry::assistant(format!("a{i}")));
        }
        gateway.complete("latest", &prior).await;

        // system prompt + 4 windowed entries
        assert_eq!(*provider.seen.lock().unwrap(), 5);
    }

    #[test]
    fn ends_with_user_turn_checks_last_role() {
        assert!(!ends_with_user_turn(&[]));
        assert!(ends_with_user_turn(&[HistoryEntry::user("hi")]));
        assert!(!ends_with_user_turn(&[
            HistoryEntry::user("hi"),
            HistoryEntry::assistant("hello"),
        ]));
    }
}
