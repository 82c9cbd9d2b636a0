//! REST endpoints: the stateless completion route and a health probe.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::conversation::controller::GREETING;
use crate::conversation::message::HistoryEntry;
use crate::gateway::{ends_with_user_turn, CompletionGateway};

/// Shared state for the REST routes.
#[derive(Clone)]
pub struct ApiState {
    pub gateway: Arc<CompletionGateway>,
}

/// `POST /api/chat` request body: the full history including the pending
/// user message, as the widget accumulates it.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
}

/// `POST /api/chat` response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub suggest_consultation: bool,
}

/// POST /api/chat
///
/// Always answers 200: upstream failures surface as the gateway's static
/// fallback reply, never as an error status.
async fn post_chat(
    State(state): State<ApiState>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    if body.messages.is_empty() {
        return Json(ChatResponse {
            reply: GREETING.to_string(),
            suggest_consultation: false,
        });
    }

    if !ends_with_user_turn(&body.messages) {
        tracing::debug!("chat request history does not end with a user turn");
    }

    let reply = state.gateway.complete_history(&body.messages).await;
    Json(ChatResponse {
        reply: reply.text,
        suggest_consultation: reply.suggest_consultation,
    })
}

/// GET /api/health
async fn get_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the REST routes.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/api/chat", post(post_chat))
        .route("/api/health", get(get_health))
        .with_state(state)
}
