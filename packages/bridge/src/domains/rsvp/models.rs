//! Core RSVP types: attendance statuses, the reaction vocabulary, and the
//! ledger entry recorded per active reaction.

use serde::{Deserialize, Serialize};

/// Attendance status as Festa understands it.
///
/// `Invited` is synthetic: no emoji produces it. It is reported when a guest
/// has no active qualifying reaction left (never reacted, or retracted their
/// last one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Going,
    NotGoing,
    Maybe,
    Invited,
}

impl Status {
    /// Map a reaction emoji to a status. Anything outside the fixed
    /// vocabulary returns `None` and must be ignored by callers.
    ///
    /// Both the plain and emoji-presentation (trailing U+FE0F) forms of the
    /// thumbs are accepted, since clients send either.
    pub fn from_symbol(symbol: &str) -> Option<Status> {
        match symbol {
            "\u{1F44D}" | "\u{1F44D}\u{FE0F}" => Some(Status::Going),
            "\u{1F44E}" | "\u{1F44E}\u{FE0F}" => Some(Status::NotGoing),
            "\u{1F914}" => Some(Status::Maybe),
            _ => None,
        }
    }

    /// True for statuses a guest can express directly with a reaction.
    /// `Invited` seeds in the ledger don't count as RSVP signals.
    pub fn is_rsvp(self) -> bool {
        !matches!(self, Status::Invited)
    }

    /// Wire string used in Festa payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Going => "going",
            Status::NotGoing => "notgoing",
            Status::Maybe => "maybe",
            Status::Invited => "invited",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One active reaction (or synthetic invite seed) in a room's ledger.
///
/// `source_event_id` is the chat event that created this entry; a redaction
/// of that event destroys it. Multiple entries from the same sender coexist
/// when they react more than once without retracting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpReaction {
    pub status: Status,
    pub sender_id: String,
    pub source_event_id: String,
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_maps_three_statuses() {
        assert_eq!(Status::from_symbol("👍"), Some(Status::Going));
        assert_eq!(Status::from_symbol("👎"), Some(Status::NotGoing));
        assert_eq!(Status::from_symbol("🤔"), Some(Status::Maybe));
    }

    #[test]
    fn test_vocabulary_accepts_presentation_variants() {
        assert_eq!(Status::from_symbol("👍\u{FE0F}"), Some(Status::Going));
        assert_eq!(Status::from_symbol("👎\u{FE0F}"), Some(Status::NotGoing));
    }

    #[test]
    fn test_unknown_symbols_are_rejected() {
        assert_eq!(Status::from_symbol("🎉"), None);
        assert_eq!(Status::from_symbol("WOOOOO"), None);
        assert_eq!(Status::from_symbol(""), None);
    }

    #[test]
    fn test_no_symbol_produces_invited() {
        for symbol in ["👍", "👍\u{FE0F}", "👎", "👎\u{FE0F}", "🤔"] {
            assert_ne!(Status::from_symbol(symbol), Some(Status::Invited));
        }
    }

    #[test]
    fn test_invited_is_not_an_rsvp_signal() {
        assert!(Status::Going.is_rsvp());
        assert!(Status::NotGoing.is_rsvp());
        assert!(Status::Maybe.is_rsvp());
        assert!(!Status::Invited.is_rsvp());
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(Status::Going.as_str(), "going");
        assert_eq!(Status::NotGoing.as_str(), "notgoing");
        assert_eq!(Status::Maybe.as_str(), "maybe");
        assert_eq!(Status::Invited.as_str(), "invited");
    }

    #[test]
    fn test_serde_matches_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Status::NotGoing).unwrap(),
            "\"notgoing\""
        );
        let parsed: Status = serde_json::from_str("\"maybe\"").unwrap();
        assert_eq!(parsed, Status::Maybe);
    }
}
