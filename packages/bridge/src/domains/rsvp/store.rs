//! In-memory RSVP state: per-room reaction ledgers and the per-room RSVP
//! message registry.
//!
//! All updates are pure functions that return a new state value. The worker
//! task holds the only `RsvpState` and swaps it wholesale after each
//! transition, so no locking is needed and every decision (in particular
//! reconciliation) sees a consistent snapshot.

use std::collections::HashMap;

use crate::domains::rsvp::models::RsvpReaction;

/// The bridge's entire mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpState {
    /// Active reactions per room, in arrival order.
    pub reactions: HashMap<String, Vec<RsvpReaction>>,
    /// The message collecting RSVP reactions, per room. Once set for a room
    /// it stays set for the process lifetime.
    pub rsvp_messages: HashMap<String, String>,
}

impl RsvpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The room's RSVP message id, if one has been established.
    pub fn rsvp_message_id(&self, room_id: &str) -> Option<&str> {
        self.rsvp_messages.get(room_id).map(String::as_str)
    }

    /// The room's active reactions, if any have been tracked.
    pub fn reactions_in_room(&self, room_id: &str) -> Option<&[RsvpReaction]> {
        self.reactions.get(room_id).map(Vec::as_slice)
    }
}

/// Whether `remove_rsvp` actually found something to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Append a reaction to a room's ledger, creating the ledger if the room is
/// new. No deduplication: the same sender reacting twice yields two entries,
/// which is exactly what reconciliation later relies on.
pub fn add_rsvp(state: &RsvpState, room_id: &str, reaction: RsvpReaction) -> RsvpState {
    let mut next = state.clone();
    next.reactions
        .entry(room_id.to_string())
        .or_default()
        .push(reaction);
    next
}

/// Remove every entry whose source event matches the redacted id.
///
/// An unknown room or an id we never tracked returns the state unchanged
/// with `NotFound`; callers log and carry on.
pub fn remove_rsvp(
    state: &RsvpState,
    room_id: &str,
    source_event_id: &str,
) -> (RsvpState, RemoveOutcome) {
    let Some(room) = state.reactions.get(room_id) else {
        return (state.clone(), RemoveOutcome::NotFound);
    };

    let remaining: Vec<RsvpReaction> = room
        .iter()
        .filter(|r| r.source_event_id != source_event_id)
        .cloned()
        .collect();
    if remaining.len() == room.len() {
        return (state.clone(), RemoveOutcome::NotFound);
    }

    let mut next = state.clone();
    next.reactions.insert(room_id.to_string(), remaining);
    (next, RemoveOutcome::Removed)
}

/// Record the room's RSVP message, first writer wins.
///
/// Two paths race to establish it — adopting the id Festa already knows, and
/// nominating the target of the first qualifying reaction. Making the write
/// idempotent means whichever lands first sticks and the loser is a no-op.
pub fn set_rsvp_message_if_absent(state: &RsvpState, room_id: &str, event_id: &str) -> RsvpState {
    if state.rsvp_messages.contains_key(room_id) {
        return state.clone();
    }
    let mut next = state.clone();
    next.rsvp_messages
        .insert(room_id.to_string(), event_id.to_string());
    next
}
