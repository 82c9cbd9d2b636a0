//! Conversation message types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::{ChatMessage, Role};

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

/// A navigational link attached to a bot message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// One message in the visible conversation transcript.
///
/// Immutable once appended; ids are a per-conversation counter so
/// concurrently open widget instances never collide.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NavLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<String>,
}

impl ConversationMessage {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::User,
            text: text.into(),
            links: Vec::new(),
            quick_replies: Vec::new(),
        }
    }

    pub fn bot(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::Bot,
            text: text.into(),
            links: Vec::new(),
            quick_replies: Vec::new(),
        }
    }

    pub fn with_quick_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quick_replies = replies.into_iter().map(Into::into).collect();
        self
    }
}

/// The subset of message data forwarded to the completion service, and the
/// wire shape of the REST completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&HistoryEntry> for ChatMessage {
    fn from(entry: &HistoryEntry) -> Self {
        ChatMessage {
            role: entry.role,
            content: entry.content.clone(),
        }
    }
}

/// A bot message plus the simulated typing delay the channel should apply
/// before delivering it. Delays are data so tests never sleep.
#[derive(Debug, Clone)]
pub struct BotReply {
    pub message: ConversationMessage,
    pub typing: Duration,
}
