//! Lead form — per-slot validation, storage, and advancement.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use super::prompts;
use super::slots::LeadSlot;

/// Loose `local@domain.tld` shape check.
///
/// Deliberately not an RFC validator: it accepts consecutive dots and
/// rejects quoted local parts. The widget only needs a shape gate; a bad
/// address costs one re-prompt, not a lost lead.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Check an email candidate against the loose shape.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

/// The collected lead, filled one field per advancing slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub company: String,
    pub service: String,
    pub challenge: String,
    /// Set when the final slot is filled and the record is closed.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// What the state machine asks the controller to do after consuming input.
#[derive(Debug, Clone)]
pub enum SlotOutcome {
    /// Input accepted; emit the next slot's prompt.
    Advanced {
        prompt: String,
        quick_replies: Vec<String>,
    },
    /// Input rejected; re-prompt without advancing.
    Rejected { prompt: String },
    /// Final slot filled; the record is closed.
    Completed { record: LeadRecord, summary: String },
}

/// The active lead collection form: current slot plus the record so far.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    slot: LeadSlot,
    record: LeadRecord,
}

impl LeadForm {
    /// Fresh form at the name slot with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self) -> LeadSlot {
        self.slot
    }

    pub fn record(&self) -> &LeadRecord {
        &self.record
    }

    /// Consume one user input for the current slot.
    ///
    /// `input` is already trimmed and non-empty (the controller drops blank
    /// input before it reaches the form). Each slot stores its value exactly
    /// once; earlier values are never touched again.
    pub fn apply(&mut self, input: &str) -> SlotOutcome {
        match self.slot {
            LeadSlot::Name => {
                self.record.name = input.to_string();
                self.advance();
                SlotOutcome::Advanced {
                    prompt: prompts::email_prompt(&self.record.name),
                    quick_replies: Vec::new(),
                }
            }
            LeadSlot::Email => {
                if !is_valid_email(input) {
                    return SlotOutcome::Rejected {
                        prompt: prompts::INVALID_EMAIL_PROMPT.to_string(),
                    };
                }
                self.record.email = input.to_string();
                self.advance();
                SlotOutcome::Advanced {
                    prompt: prompts::COMPANY_PROMPT.to_string(),
                    quick_replies: Vec::new(),
                }
            }
            LeadSlot::Company => {
                self.record.company = input.to_string();
                self.advance();
                SlotOutcome::Advanced {
                    prompt: prompts::SERVICE_PROMPT.to_string(),
                    quick_replies: prompts::SERVICE_OPTIONS.iter().map(|s| s.to_string()).collect(),
                }
            }
            LeadSlot::Service => {
                // Free text or a quick-reply label, stored verbatim.
                self.record.service = input.to_string();
                self.advance();
                SlotOutcome::Advanced {
                    prompt: prompts::CHALLENGE_PROMPT.to_string(),
                    quick_replies: Vec::new(),
                }
            }
            LeadSlot::Challenge => {
                self.record.challenge = input.to_string();
                self.record.submitted_at = Some(Utc::now());
                self.advance();
                SlotOutcome::Completed {
                    summary: prompts::summary(&self.record),
                    record: self.record.clone(),
                }
            }
            LeadSlot::Done => {
                // The controller exits collection mode at Completed; input
                // can't reach a closed form. Treat it as a no-op re-prompt.
                tracing::warn!("input applied to closed lead form");
                SlotOutcome::Rejected {
                    prompt: prompts::CLOSING_MESSAGE.to_string(),
                }
            }
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.slot.next() {
            debug_assert!(self.slot.can_transition_to(next));
            self.slot = next;
        }
    }
}
