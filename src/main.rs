use std::sync::Arc;

use tosh_assist::config::AssistantConfig;
use tosh_assist::gateway::CompletionGateway;
use tosh_assist::lead::LogSink;
use tosh_assist::llm::{create_provider, LlmBackend, LlmConfig, LlmProvider};
use tosh_assist::server::{self, ApiState, ChatState, RateLimitConfig, RateLimiter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AssistantConfig::from_env()?;

    // A missing credential degrades the chat to static fallback replies
    // instead of refusing to start; the rest of the site keeps working.
    let provider: Option<Arc<dyn LlmProvider>> = match std::env::var("ANTHROPIC_API_KEY") {
        Ok(api_key) => {
            let llm_config = LlmConfig {
                backend: LlmBackend::Anthropic,
                api_key: secrecy::SecretString::from(api_key),
                model: config.model.clone(),
            };
            Some(create_provider(&llm_config)?)
        }
        Err(_) => {
            tracing::warn!(
                "ANTHROPIC_API_KEY not set; chat will serve static fallback replies"
            );
            None
        }
    };

    eprintln!("Tosh Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Chat WS: ws://0.0.0.0:{}/ws/chat", config.port);
    eprintln!("   Chat API: http://0.0.0.0:{}/api/chat", config.port);
    eprintln!("   Health: http://0.0.0.0:{}/api/health", config.port);

    let gateway = Arc::new(CompletionGateway::new(provider, &config));
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));

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

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "server started");
    axum::serve(listener, app).await?;

    Ok(())
}
