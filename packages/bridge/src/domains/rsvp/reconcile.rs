//! Deciding what status to report after a reaction is retracted.
//!
//! Festa only stores the *current* status per guest, so removing a reaction
//! says nothing by itself — the new status has to be reconstructed from
//! whatever signals the sender still has in the ledger.

use crate::domains::rsvp::models::{RsvpReaction, Status};

/// Compute the status to report for the sender of a retracted reaction, or
/// `None` if nothing should be reported.
///
/// The rule is a strict 0/1/many split over the sender's *other* active RSVP
/// signals (synthetic `Invited` seeds don't count):
/// - exactly one left: that signal becomes their status again;
/// - none left: they fall back to plain `Invited`;
/// - two or more left: ambiguous, report nothing rather than guess.
///
/// A retracted id we never tracked also reports nothing.
pub fn status_after_retraction(
    rsvps_in_room: &[RsvpReaction],
    redacted_event_id: &str,
) -> Option<Status> {
    let redacted = rsvps_in_room
        .iter()
        .find(|r| r.source_event_id == redacted_event_id)?;

    let mut others = rsvps_in_room
        .iter()
        .filter(|r| r.sender_id == redacted.sender_id)
        .filter(|r| r.source_event_id != redacted_event_id)
        .filter(|r| r.status.is_rsvp());

    match (others.next(), others.next()) {
        (Some(only), None) => Some(only.status),
        (None, _) => Some(Status::Invited),
        (Some(_), Some(_)) => None,
    }
}
