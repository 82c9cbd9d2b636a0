//! Booking-intent detection.
//!
//! A closed phrase vocabulary, matched case-insensitively: exact membership
//! in the affirmative set, or substring containment of the two explicit
//! booking phrases. Not configurable at runtime.

/// Phrases that count as confirming or requesting a consultation booking.
const BOOKING_TRIGGERS: [&str; 10] = [
    "yes, book a consultation",
    "book a consultation",
    "yes please",
    "yes, let's do it",
    "sure",
    "yes",
    "yeah",
    "yep",
    "i'd like to book a consultation",
    "i'd like to book",
];

/// What the controller decided about a user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start (or confirm) the consultation booking flow.
    BookConsultation,
    /// Anything else: forward to the completion service.
    FreeForm,
}

impl Intent {
    /// Classify one user input.
    pub fn classify(text: &str) -> Intent {
        let q = text.trim().to_lowercase();
        if BOOKING_TRIGGERS.contains(&q.as_str())
            || q.contains("book a consultation")
            || q.contains("i'd like to book")
        {
            Intent::BookConsultation
        } else {
            Intent::FreeForm
        }
    }
}
