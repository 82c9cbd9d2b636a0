//! Lead collection state machine — tracks which slot the visitor is filling.

use serde::{Deserialize, Serialize};

/// The slots of the lead collection conversation.
///
/// Progresses linearly: Name → Email → Company → Service → Challenge → Done.
/// Strictly forward: no back-navigation, no skipping, no abandonment timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSlot {
    Name,
    Email,
    Company,
    Service,
    Challenge,
    Done,
}

impl LeadSlot {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: LeadSlot) -> bool {
        use LeadSlot::*;
        matches!(
            (self, target),
            (Name, Email)
                | (Email, Company)
                | (Company, Service)
                | (Service, Challenge)
                | (Challenge, Done)
        )
    }

    /// Whether this slot is terminal (collection is closed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Get the next slot in the linear progression, if any.
    pub fn next(&self) -> Option<LeadSlot> {
        use LeadSlot::*;
        match self {
            Name => Some(Email),
            Email => Some(Company),
            Company => Some(Service),
            Service => Some(Challenge),
            Challenge => Some(Done),
            Done => None,
        }
    }
}

impl Default for LeadSlot {
    fn default() -> Self {
        Self::Name
    }
}

impl std::fmt::Display for LeadSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Service => "service",
            Self::Challenge => "challenge",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}
