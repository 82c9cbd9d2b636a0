//! Prompt copy and quick-reply vocabulary for the lead collection flow.

use super::form::LeadRecord;

/// Service-area labels offered as quick replies at the service slot.
pub const SERVICE_OPTIONS: [&str; 7] = [
    "Business Consulting",
    "Business Process Services",
    "Managed IT Services",
    "Artificial Intelligence",
    "Data Analytics",
    "Cloud & Hybrid IT",
    "Not sure yet",
];

/// Opening message when a collection session starts (includes the name
/// prompt).
pub const START_PROMPT: &str = "Great! I can help you book a free 30-minute discovery call right here. Let me collect a few details.\n\nWhat's your full name?";

/// Company slot prompt.
pub const COMPANY_PROMPT: &str = "And what company are you with?";

/// Service slot prompt (carries [`SERVICE_OPTIONS`] as quick replies).
pub const SERVICE_PROMPT: &str = "Which service area are you most interested in?";

/// Challenge slot prompt.
pub const CHALLENGE_PROMPT: &str =
    "Last one — could you briefly describe the challenge or goal you'd like help with?";

/// Re-prompt after an invalid email; the slot does not advance.
pub const INVALID_EMAIL_PROMPT: &str =
    "That doesn't look like a valid email. Could you try again?";

/// Closing confirmation after the summary.
pub const CLOSING_MESSAGE: &str = "Your request has been submitted! A senior consultant will reach out within one business day to schedule your free discovery call. Is there anything else I can help with?";

/// Follow-up suggestions attached to the closing confirmation.
pub const CLOSING_FOLLOW_UPS: [&str; 3] = [
    "What services do you offer?",
    "Tell me about your industries",
    "How can I contact you?",
];

/// First whitespace-separated token of a full name, for personalization.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}

/// Email slot prompt, personalized with the visitor's first name.
pub fn email_prompt(full_name: &str) -> String {
    format!(
        "Thanks, {}! What's the best email to reach you at?",
        first_name(full_name)
    )
}

/// Summary message enumerating every collected field verbatim.
pub fn summary(record: &LeadRecord) -> String {
    format!(
        "Thank you, {}! Here's what I've collected:\n\nName: {}\nEmail: {}\nCompany: {}\nService: {}\nChallenge: {}",
        first_name(&record.name),
        record.name,
        record.email,
        record.company,
        record.service,
        record.challenge,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_name_takes_leading_token() {
        assert_eq!(first_name("Ada Lovelace"), "Ada");
        assert_eq!(first_name("Cher"), "Cher");
        assert_eq!(first_name("  spaced  out "), "spaced");
    }

    #[test]
    fn email_prompt_personalizes() {
        assert_eq!(
            email_prompt("Grace Hopper"),
            "Thanks, Grace! What's the best email to reach you at?"
        );
    }

    #[test]
    fn summary_contains_every_field_verbatim() {
        let record = LeadRecord {
            name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            company: "US Navy".to_string(),
            service: "Data Analytics".to_string(),
            challenge: "Compilers for everyone".to_string(),
            submitted_at: None,
        };
        let text = summary(&record);
        assert!(text.starts_with("Thank you, Grace!"));
        for field in [
            "Grace Hopper",
            "grace@navy.mil",
            "US Navy",
            "Data Analytics",
            "Compilers for everyone",
        ] {
            assert!(text.contains(field), "summary missing {field}");
        }
    }

    #[test]
    fn closing_has_exactly_three_follow_ups() {
        assert_eq!(CLOSING_FOLLOW_UPS.len(), 3);
    }
}
