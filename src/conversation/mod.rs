//! Conversation layer — the widget session's controller and message types.

pub mod controller;
pub mod intent;
pub mod message;

pub use controller::{Conversation, SessionState};
pub use intent::Intent;
pub use message::{BotReply, ConversationMessage, HistoryEntry, NavLink, Sender};
