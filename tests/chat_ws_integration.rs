//! Integration tests for the chat WebSocket + REST surface.
//!
//! Each test spins up an Axum server on a random port, connects via
//! tokio-tungstenite or reqwest, and exercises the real wire contract with a
//! stub completion provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use tosh_assist::config::{AssistantConfig, TypingDelays};
use tosh_assist::error::LlmError;
use tosh_assist::gateway::{CompletionGateway, FALLBACK_REPLY};
use tosh_assist::lead::LogSink;
use tosh_assist::llm::{CompletionRequest, CompletionResponse, FinishReason, LlmProvider};
use tosh_assist::server::{self, ApiState, ChatState, RateLimitConfig, RateLimiter};
use tosh_assist::server::ratelimit::RateRule;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Stub LLM provider for integration tests (no real API calls).
struct StubLlm {
    reply: Option<&'static str>,
}

impl StubLlm {
    fn ok(reply: &'static str) -> Self {
        Self { reply: Some(reply) }
    }

    fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn model_name(&self) -> &str {
        "stub"
    }
    fn cost_per_token(&self) -> (Decimal, Decimal) {
        (Decimal::ZERO, Decimal::ZERO)
    }
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        match self.reply {
            Some(content) => Ok(CompletionResponse {
                content: content.to_string(),
                input_tokens: 0,
                output_tokens: 0,
                finish_reason: FinishReason::Stop,
                response_id: None,
            }),
            None => Err(LlmError::RequestFailed {
                provider: "stub".to_string(),
                reason: "simulated network error".to_string(),
            }),
        }
    }
}

/// Start a server on a random port. Typing delays are zeroed so frame
/// sequences arrive immediately.
async fn start_server(provider: StubLlm, rate_limits: Option<RateLimitConfig>) -> u16 {
    let config = AssistantConfig {
        typing: TypingDelays::none(),
        ..Default::default()
    };
    let gateway = Arc::new(CompletionGateway::new(Some(Arc::new(provider)), &config));
    let limiter = Arc::new(RateLimiter::new(rate_limits.unwrap_or_default()));

    let app = server::app(
        ApiState {
            gateway: Arc::clone(&gateway),
        },
        ChatState {
            gateway,
            sink: Arc::new(LogSink),
            delays: config.typing,
        },
        limiter,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    port
}

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn connect(port: u16) -> WsStream {
    let (ws, _resp) = connect_async(format!("ws://127.0.0.1:{port}/ws/chat"))
        .await
        .expect("WS connect failed");
    ws
}

/// Read the next frame as JSON.
async fn next_json(ws: &mut WsStream) -> Value {
    let msg = ws.next().await.unwrap().unwrap();
    match msg {
        Message::Text(txt) => serde_json::from_str(&txt).expect("invalid JSON from server"),
        other => panic!("expected Text frame, got {other:?}"),
    }
}

/// Read frames until a `message` frame arrives, skipping `typing` frames.
async fn next_message(ws: &mut WsStream) -> Value {
    loop {
        let frame = next_json(ws).await;
        if frame["type"] == "message" {
            return frame;
        }
        assert_eq!(frame["type"], "typing", "unexpected frame type: {frame}");
    }
}

async fn send_text(ws: &mut WsStream, content: &str) {
    let frame = json!({"type": "message", "content": content}).to_string();
    ws.send(Message::Text(frame.into())).await.unwrap();
}

// ── WebSocket tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn ws_connect_receives_greeting() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(StubLlm::ok("unused"), None).await;
        let mut ws = connect(port).await;

        let greeting = next_message(&mut ws).await;
        assert_eq!(greeting["sender"], "bot");
        assert!(greeting["text"].as_str().unwrap().starts_with("Hi there! I'm Tosh"));
        assert_eq!(greeting["quick_replies"].as_array().unwrap().len(), 4);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn ws_booking_flow_end_to_end() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(StubLlm::ok("unused"), None).await;
        let mut ws = connect(port).await;
        next_message(&mut ws).await; // greeting

        send_text(&mut ws, "I'd like to book a consultation").await;
        let prompt = next_message(&mut ws).await;
        assert!(prompt["text"].as_str().unwrap().contains("What's your full name?"));

        send_text(&mut ws, "Grace Hopper").await;
        let prompt = next_message(&mut ws).await;
        assert_eq!(
            prompt["text"],
            "Thanks, Grace! What's the best email to reach you at?"
        );

        // Invalid email re-prompts
        send_text(&mut ws, "not-an-email").await;
        let prompt = next_message(&mut ws).await;
        assert!(prompt["text"].as_str().unwrap().contains("doesn't look like a valid email"));

        send_text(&mut ws, "grace@navy.mil").await;
        let prompt = next_message(&mut ws).await;
        assert_eq!(prompt["text"], "And what company are you with?");

        send_text(&mut ws, "US Navy").await;
        let prompt = next_message(&mut ws).await;
        let options = prompt["quick_replies"].as_array().unwrap();
        assert_eq!(options.len(), 7);
        assert_eq!(options[3], "Artificial Intelligence");

        // Quick-reply press arrives as its label
        send_text(&mut ws, "Artificial Intelligence").await;
        let prompt = next_message(&mut ws).await;
        assert!(prompt["text"].as_str().unwrap().contains("challenge or goal"));

        send_text(&mut ws, "Modernize our data platform").await;
        let summary = next_message(&mut ws).await;
        let text = summary["text"].as_str().unwrap();
        for field in [
            "Grace Hopper",
            "grace@navy.mil",
            "US Navy",
            "Artificial Intelligence",
            "Modernize our data platform",
        ] {
            assert!(text.contains(field), "summary missing {field}");
        }

        let closing = next_message(&mut ws).await;
        assert!(closing["text"].as_str().unwrap().contains("has been submitted"));
        assert_eq!(closing["quick_replies"].as_array().unwrap().len(), 3);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn ws_gateway_failure_serves_fallback() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(StubLlm::failing(), None).await;
        let mut ws = connect(port).await;
        next_message(&mut ws).await; // greeting

        send_text(&mut ws, "what services do you offer?").await;
        let reply = next_message(&mut ws).await;
        assert_eq!(reply["text"], FALLBACK_REPLY);
        assert!(reply["text"].as_str().unwrap().contains("info@jtldinc.com"));
        assert_eq!(reply["quick_replies"].as_array().unwrap().len(), 2);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn ws_suggestion_token_becomes_quick_reply() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(
            StubLlm::ok("I don't have that information. [SUGGEST_CONSULTATION]"),
            None,
        )
        .await;
        let mut ws = connect(port).await;
        next_message(&mut ws).await; // greeting

        send_text(&mut ws, "do you sell submarines?").await;
        let reply = next_message(&mut ws).await;
        assert_eq!(reply["text"], "I don't have that information.");
        assert_eq!(reply["quick_replies"][0], "Yes, book a consultation");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn ws_blank_input_is_ignored() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(StubLlm::ok("answer"), None).await;
        let mut ws = connect(port).await;
        let greeting = next_message(&mut ws).await;
        assert_eq!(greeting["id"], 1);

        send_text(&mut ws, "   \n ").await;
        send_text(&mut ws, "a real question").await;

        // The blank turn produced no message, so the user message took id 2
        // and this reply is id 3.
        let reply = next_message(&mut ws).await;
        assert_eq!(reply["id"], 3);
        assert_eq!(reply["text"], "answer");
    })
    .await
    .expect("test timed out");
}

// ── REST tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn rest_health_carries_rate_limit_headers() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(StubLlm::ok("unused"), None).await;
        let response = reqwest::get(format!("http://127.0.0.1:{port}/api/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers().get("X-RateLimit-Limit").unwrap(),
            "100"
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_chat_empty_history_returns_greeting() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(StubLlm::ok("unused"), None).await;
        let client = reqwest::Client::new();
        let response = client
            .post(format!("http://127.0.0.1:{port}/api/chat"))
            .json(&json!({"messages": []}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert!(body["reply"].as_str().unwrap().starts_with("Hi there! I'm Tosh"));
        assert_eq!(body["suggestConsultation"], false);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_chat_strips_token_and_sets_flag() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(
            StubLlm::ok("Happy to set that up! [SUGGEST_CONSULTATION]"),
            None,
        )
        .await;
        let client = reqwest::Client::new();
        let response = client
            .post(format!("http://127.0.0.1:{port}/api/chat"))
            .json(&json!({"messages": [{"role": "user", "content": "book me in"}]}))
            .send()
            .await
            .unwrap();

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["reply"], "Happy to set that up!");
        assert_eq!(body["suggestConsultation"], true);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_chat_failure_degrades_with_200() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(StubLlm::failing(), None).await;
        let client = reqwest::Client::new();
        let response = client
            .post(format!("http://127.0.0.1:{port}/api/chat"))
            .json(&json!({"messages": [{"role": "user", "content": "hello"}]}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["reply"], FALLBACK_REPLY);
        assert_eq!(body["suggestConsultation"], false);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_rate_limit_returns_429_after_burst() {
    timeout(TEST_TIMEOUT, async {
        let limits = RateLimitConfig {
            rules: vec![(
                "/api".to_string(),
                RateRule {
                    max: 2,
                    window: Duration::from_secs(60),
                },
            )],
        };
        let port = start_server(StubLlm::ok("unused"), Some(limits)).await;
        let client = reqwest::Client::new();
        let url = format!("http://127.0.0.1:{port}/api/health");

        assert_eq!(client.get(&url).send().await.unwrap().status(), 200);
        assert_eq!(client.get(&url).send().await.unwrap().status(), 200);

        let denied = client.get(&url).send().await.unwrap();
        assert_eq!(denied.status(), 429);
        assert!(denied.headers().contains_key("Retry-After"));
        assert_eq!(denied.headers().get("X-RateLimit-Remaining").unwrap(), "0");
        let body: Value = denied.json().await.unwrap();
        assert_eq!(body["error"]["code"], "RATE_LIMITED");
    })
    .await
    .expect("test timed out");
}
