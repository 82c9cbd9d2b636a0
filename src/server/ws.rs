//! WebSocket chat channel — one conversation session per socket.
//!
//! The widget connects to `/ws/chat`, receives the greeting, and exchanges
//! tagged JSON frames. Typing delays attached to bot replies are applied
//! here, between a `typing` frame and the delivered message.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TypingDelays;
use crate::conversation::message::{BotReply, ConversationMessage};
use crate::conversation::Conversation;
use crate::gateway::CompletionGateway;
use crate::lead::LeadSink;

/// Shared state for the chat channel.
#[derive(Clone)]
pub struct ChatState {
    pub gateway: Arc<CompletionGateway>,
    pub sink: Arc<dyn LeadSink>,
    pub delays: TypingDelays,
}

/// Frame from widget → server.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ClientMessage {
    #[serde(rename = "message")]
    Message { content: String },
}

/// Frame from server → widget.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ServerMessage {
    #[serde(rename = "typing")]
    Typing,
    #[serde(rename = "message")]
    Message {
        #[serde(flatten)]
        message: ConversationMessage,
    },
}

/// Build the chat WebSocket routes.
pub fn chat_routes(state: ChatState) -> Router {
    Router::new()
        .route("/ws/chat", get(ws_chat_handler))
        .with_state(state)
}

async fn ws_chat_handler(
    ws: WebSocketUpgrade,
    State(state): State<ChatState>,
) -> impl IntoResponse {
    info!("chat client connecting");
    ws.on_upgrade(move |socket| handle_chat_socket(socket, state))
}

async fn handle_chat_socket(mut socket: WebSocket, state: ChatState) {
    info!("chat client connected");
    let mut conversation = Conversation::new(state.gateway, state.sink, state.delays);

    // Opening the widget seeds the greeting.
    for reply in conversation.greeting() {
        if deliver(&mut socket, &reply).await.is_err() {
            debug!("chat client disconnected during greeting");
            return;
        }
    }

    while let Some(result) = socket.recv().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Message { content }) => {
                    // Show the indicator while the turn is processed; blank
                    // input produces no replies and the next frame clears it.
                    if send_frame(&mut socket, &ServerMessage::Typing).await.is_err() {
                        break;
                    }
                    let replies = conversation.send(&content).await;
                    let mut closed = false;
                    for reply in replies {
                        if deliver(&mut socket, &reply).await.is_err() {
                            closed = true;
                            break;
                        }
                    }
                    if closed {
                        break;
                    }
                }
                Err(e) => {
                    debug!(error = %e, text = %text, "invalid JSON from chat client");
                }
            },
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("chat client disconnected");
                break;
            }
            Err(e) => {
                warn!(error = %e, "chat WebSocket error");
                break;
            }
            _ => {}
        }
    }

    info!("chat connection closed");
}

/// Apply the reply's typing delay, then send the message frame.
async fn deliver(socket: &mut WebSocket, reply: &BotReply) -> Result<(), axum::Error> {
    if reply.typing > Duration::ZERO {
        send_frame(socket, &ServerMessage::Typing).await?;
        tokio::time::sleep(reply.typing).await;
    }
    send_frame(
        socket,
        &ServerMessage::Message {
            message: reply.message.clone(),
        },
    )
    .await
}

async fn send_frame(socket: &mut WebSocket, frame: &ServerMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(frame).unwrap_or_default();
    socket.send(Message::Text(json.into())).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_frame_parses() {
        let frame: ClientMessage =
            serde_json::from_str(r#"{"type": "message", "content": "hello"}"#).unwrap();
        let ClientMessage::Message { content } = frame;
        assert_eq!(content, "hello");
    }

    #[test]
    fn server_message_frame_flattens_conversation_message() {
        let frame = ServerMessage::Message {
            message: ConversationMessage::bot(7, "hi").with_quick_replies(["A"]),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["id"], 7);
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["text"], "hi");
        assert_eq!(json["quick_replies"][0], "A");
    }

    #[test]
    fn typing_frame_is_bare() {
        let json = serde_json::to_value(&ServerMessage::Typing).unwrap();
        assert_eq!(json, serde_json::json!({"type": "typing"}));
    }
}
