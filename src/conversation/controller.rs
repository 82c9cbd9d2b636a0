//! Conversation controller — owns one widget session.
//!
//! Routes each user turn either into the lead collection state machine or to
//! the completion gateway, appends to the transcript, and hands back bot
//! replies tagged with their typing delays. One controller per open widget
//! instance; nothing is shared across sessions.

use std::sync::Arc;
use std::time::Duration;

use crate::config::TypingDelays;
use crate::conversation::intent::Intent;
use crate::conversation::message::{BotReply, ConversationMessage, HistoryEntry};
use crate::gateway::CompletionGateway;
use crate::lead::{LeadForm, LeadSink, LeadSlot, SlotOutcome};

/// Greeting seeded when the widget first opens.
pub const GREETING: &str = "Hi there! I'm Tosh, your virtual assistant. How can I help you today?";

/// Quick replies attached to the greeting.
pub const GREETING_FOLLOW_UPS: [&str; 4] = [
    "What services do you offer?",
    "Tell me about JTLD",
    "I'd like to book a consultation",
    "How can I contact you?",
];

/// Quick reply attached when the gateway signals a booking call-to-action.
pub const SUGGEST_FOLLOW_UP: &str = "Yes, book a consultation";

/// Quick replies attached to a degraded gateway reply.
pub const FALLBACK_FOLLOW_UPS: [&str; 2] =
    ["I'd like to book a consultation", "How can I contact you?"];

/// Mode flags for the session. The current slot lives on the lead form.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionState {
    /// A lead collection flow is active; input goes to the state machine.
    pub collecting: bool,
    /// The gateway just suggested booking; the next affirmative starts a
    /// collection flow. One-shot: cleared on the next free-form turn.
    pub awaiting_confirmation: bool,
}

/// One open widget conversation.
pub struct Conversation {
    next_id: u64,
    messages: Vec<ConversationMessage>,
    history: Vec<HistoryEntry>,
    session: SessionState,
    form: LeadForm,
    gateway: Arc<CompletionGateway>,
    sink: Arc<dyn LeadSink>,
    delays: TypingDelays,
}

impl Conversation {
    pub fn new(
        gateway: Arc<CompletionGateway>,
        sink: Arc<dyn LeadSink>,
        delays: TypingDelays,
    ) -> Self {
        Self {
            next_id: 1,
            messages: Vec::new(),
            history: Vec::new(),
            session: SessionState::default(),
            form: LeadForm::new(),
            gateway,
            sink,
            delays,
        }
    }

    /// Seed the greeting on first open. No-op if the transcript already has
    /// messages (reopening the widget keeps the session).
    pub fn greeting(&mut self) -> Vec<BotReply> {
        if !self.messages.is_empty() {
            return Vec::new();
        }
        vec![self.push_bot(GREETING, GREETING_FOLLOW_UPS.map(String::from).to_vec(), Duration::ZERO)]
    }

    /// Process one user turn. Quick-reply presses re-enter here with the
    /// button label as `raw`, indistinguishable from typed input.
    ///
    /// Whitespace-only input is a complete no-op. Otherwise exactly one user
    /// message is appended, then in priority order: active collection, armed
    /// confirmation, explicit booking intent, free-form completion.
    pub async fn send(&mut self, raw: &str) -> Vec<BotReply> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        self.push_user(trimmed);

        if self.session.collecting {
            return self.handle_collection(trimmed).await;
        }

        // The armed-confirmation check and the explicit booking check share
        // one phrase vocabulary, so a bare "yes" starts the flow whether or
        // not it was just suggested.
        if Intent::classify(trimmed) == Intent::BookConsultation {
            return self.start_collection();
        }

        self.handle_free_form(trimmed).await
    }

    /// Current transcript, insertion order.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Retained completion history (user/assistant pairs).
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    /// The slot the active collection flow is waiting on, if any.
    pub fn current_slot(&self) -> Option<LeadSlot> {
        self.session.collecting.then(|| self.form.slot())
    }

    // ── Branches ────────────────────────────────────────────────────────

    fn start_collection(&mut self) -> Vec<BotReply> {
        self.session.collecting = true;
        self.session.awaiting_confirmation = false;
        self.form = LeadForm::new();
        tracing::debug!("lead collection started");
        vec![self.push_bot(
            crate::lead::prompts::START_PROMPT,
            Vec::new(),
            self.delays.prompt,
        )]
    }

    async fn handle_collection(&mut self, input: &str) -> Vec<BotReply> {
        match self.form.apply(input) {
            SlotOutcome::Advanced { prompt, quick_replies } => {
                vec![self.push_bot(prompt, quick_replies, self.delays.prompt)]
            }
            SlotOutcome::Rejected { prompt } => {
                vec![self.push_bot(prompt, Vec::new(), self.delays.retry)]
            }
            SlotOutcome::Completed { record, summary } => {
                self.session.collecting = false;
                if let Err(e) = self.sink.submit(&record).await {
                    tracing::warn!(error = %e, "lead sink rejected record");
                }
                vec![
                    self.push_bot(summary, Vec::new(), self.delays.summary),
                    self.push_bot(
                        crate::lead::prompts::CLOSING_MESSAGE,
                        crate::lead::prompts::CLOSING_FOLLOW_UPS.map(String::from).to_vec(),
                        self.delays.closing,
                    ),
                ]
            }
        }
    }

    async fn handle_free_form(&mut self, input: &str) -> Vec<BotReply> {
        self.session.awaiting_confirmation = false;

        let reply = self.gateway.complete(input, &self.history).await;

        // Degraded replies are static copy, not model output; keep them out
        // of the forwarded context.
        if !reply.is_fallback {
            self.history.push(HistoryEntry::user(input));
            self.history.push(HistoryEntry::assistant(&reply.text));
        }

        let quick_replies = if reply.suggest_consultation {
            self.session.awaiting_confirmation = true;
            vec![SUGGEST_FOLLOW_UP.to_string()]
        } else if reply.is_fallback {
            FALLBACK_FOLLOW_UPS.map(String::from).to_vec()
        } else {
            Vec::new()
        };

        vec![self.push_bot(reply.text, quick_replies, Duration::ZERO)]
    }

    // ── Transcript helpers ──────────────────────────────────────────────

    fn push_user(&mut self, text: &str) {
        let id = self.take_id();
        self.messages.push(ConversationMessage::user(id, text));
    }

    fn push_bot(
        &mut self,
        text: impl Into<String>,
        quick_replies: Vec<String>,
        typing: Duration,
    ) -> BotReply {
        let id = self.take_id();
        let message = ConversationMessage::bot(id, text).with_quick_replies(quick_replies);
        self.messages.push(message.clone());
        BotReply { message, typing }
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
