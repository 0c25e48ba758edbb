//! Event handlers: orchestrate the ledger, the RSVP-message registry,
//! reconciliation, and the outbound Festa calls for each inbound event.
//!
//! Nothing in here returns an error. A failed remote call is logged and the
//! event is skipped; the process never dies over one reaction.

use tracing::{debug, info, warn};

use crate::common::utils::{link_event_url, username_localpart};
use crate::domains::rsvp::events::{ChatEvent, MembershipEvent, ReactionEvent, RedactionEvent};
use crate::domains::rsvp::models::{RsvpReaction, Status};
use crate::domains::rsvp::reconcile::status_after_retraction;
use crate::domains::rsvp::store::{
    add_rsvp, remove_rsvp, set_rsvp_message_if_absent, RemoveOutcome, RsvpState,
};
use crate::kernel::BridgeDeps;

/// Route one inbound event to its handler. Each event runs to completion
/// before the caller takes the next one; that ordering is what guarantees
/// reconciliation always sees a consistent ledger.
pub async fn handle_event(state: &mut RsvpState, deps: &BridgeDeps, event: &ChatEvent) {
    match event {
        ChatEvent::Reaction(e) => handle_reaction(state, deps, e).await,
        ChatEvent::Redaction(e) => handle_redaction(state, deps, e).await,
        ChatEvent::Membership(e) => handle_membership(state, deps, e).await,
    }
}

/// A reaction was added somewhere in a room.
pub async fn handle_reaction(state: &mut RsvpState, deps: &BridgeDeps, event: &ReactionEvent) {
    let Some(relates_to) = event.relates_to.as_ref() else {
        warn!(room = %event.room_id, "reaction event carries no relation target, ignoring");
        return;
    };

    let Some(status) = Status::from_symbol(&relates_to.key) else {
        debug!(room = %event.room_id, symbol = %relates_to.key, "symbol is not in the RSVP vocabulary");
        return;
    };

    // If we don't yet know which message collects RSVPs here, ask Festa.
    if state.rsvp_message_id(&event.room_id).is_none() {
        let lookup = match deps.attendance.lookup_rsvp_message(&event.room_id).await {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!(room = %event.room_id, error = %e, "RSVP message lookup failed");
                return;
            }
        };

        if !lookup.exists {
            // Not linked to an event; retried on the next qualifying event.
            debug!(room = %event.room_id, "room is not linked to a Festa event, ignoring reaction");
            return;
        }

        if let Some(known) = lookup.rsvp_message_id {
            *state = set_rsvp_message_if_absent(state, &event.room_id, &known);
        } else {
            // Linked room without an RSVP message yet: the message under
            // this first reaction becomes it. Festa's endpoint is
            // idempotent, so a failed persist still counts locally and a
            // restart re-nominates.
            if let Err(e) = deps
                .attendance
                .persist_rsvp_message(&event.room_id, &relates_to.event_id)
                .await
            {
                warn!(room = %event.room_id, error = %e, "failed to persist nominated RSVP message");
            }
            *state = set_rsvp_message_if_absent(state, &event.room_id, &relates_to.event_id);
        }
    }

    if state.rsvp_message_id(&event.room_id) != Some(relates_to.event_id.as_str()) {
        debug!(room = %event.room_id, "reaction is not on the RSVP message, ignoring");
        return;
    }

    let display_name = lookup_display_name(deps, &event.sender).await;
    record_and_report(
        state,
        deps,
        &event.room_id,
        &event.sender,
        &event.event_id,
        display_name,
        status,
    )
    .await;
}

/// A previously sent event was redacted. If it was one of our tracked
/// reactions, work out what the sender's status has become and report it.
pub async fn handle_redaction(state: &mut RsvpState, deps: &BridgeDeps, event: &RedactionEvent) {
    let Some(redacted_id) = event.redacts.as_deref() else {
        warn!(room = %event.room_id, "redaction event names no redacted id, ignoring");
        return;
    };

    let Some(rsvps) = state.reactions_in_room(&event.room_id) else {
        // Nothing tracked in this room yet, so nothing to reconcile.
        return;
    };

    let to_report = status_after_retraction(rsvps, redacted_id).and_then(|status| {
        rsvps
            .iter()
            .find(|r| r.source_event_id == redacted_id)
            .map(|r| (status, r.sender_id.clone()))
    });

    if let Some((status, sender_id)) = to_report {
        // Names drift; fetch fresh for the original sender instead of
        // reusing what was stored with the reaction.
        let display_name = lookup_display_name(deps, &sender_id).await;
        info!(
            room = %event.room_id,
            user = %username_localpart(&sender_id),
            %status,
            "sending RSVP after retraction"
        );
        if let Err(e) = deps
            .attendance
            .report_rsvp(&event.room_id, &sender_id, status, display_name.as_deref())
            .await
        {
            warn!(room = %event.room_id, error = %e, "failed to report reconciled RSVP");
        }
    }

    // The entry goes away whether or not a report went out.
    let (next, outcome) = remove_rsvp(state, &event.room_id, redacted_id);
    if outcome == RemoveOutcome::NotFound {
        debug!(room = %event.room_id, event = %redacted_id, "redacted event was not a tracked reaction");
    }
    *state = next;
}

/// Someone joined or was invited to a room the bridge is in.
pub async fn handle_membership(state: &mut RsvpState, deps: &BridgeDeps, event: &MembershipEvent) {
    if !event.is_join() && !event.is_invite() {
        return;
    }

    if event.state_key == deps.bot_user_id {
        // Our own membership: greet the room on join, never track ourselves.
        if event.is_join() {
            info!(room = %event.room_id, "joined room, sending welcome notice");
            let body = format!(
                "Hello, this is the Festa bot! Link this chat to a Festa event via {} and guests can RSVP by reacting to a message of your choice.",
                link_event_url(&deps.festa_url, &event.room_id)
            );
            if let Err(e) = deps.chat.send_notice(&event.room_id, &body).await {
                warn!(room = %event.room_id, error = %e, "failed to send welcome notice");
            }
        }
        return;
    }

    if state.rsvp_message_id(&event.room_id).is_none() {
        let lookup = match deps.attendance.lookup_rsvp_message(&event.room_id).await {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!(room = %event.room_id, error = %e, "RSVP message lookup failed");
                return;
            }
        };

        if !lookup.exists {
            debug!(room = %event.room_id, "room is not linked to a Festa event, ignoring member");
            return;
        }

        if let Some(known) = lookup.rsvp_message_id {
            *state = set_rsvp_message_if_absent(state, &event.room_id, &known);
        }
    }

    // Seed the ledger with a synthetic invite so later reactions and
    // retractions for this member reconcile against something.
    let display_name = lookup_display_name(deps, &event.state_key).await;
    record_and_report(
        state,
        deps,
        &event.room_id,
        &event.state_key,
        &event.event_id,
        display_name,
        Status::Invited,
    )
    .await;
}

/// Append to the ledger and push the status to Festa. The append stands even
/// when the report fails: the ledger mirrors what happened in the room, not
/// what Festa acknowledged.
async fn record_and_report(
    state: &mut RsvpState,
    deps: &BridgeDeps,
    room_id: &str,
    user_id: &str,
    source_event_id: &str,
    display_name: Option<String>,
    status: Status,
) {
    let reaction = RsvpReaction {
        status,
        sender_id: user_id.to_string(),
        source_event_id: source_event_id.to_string(),
        display_name: display_name.clone(),
    };
    *state = add_rsvp(state, room_id, reaction);

    info!(room = %room_id, user = %username_localpart(user_id), %status, "sending RSVP");
    if let Err(e) = deps
        .attendance
        .report_rsvp(room_id, user_id, status, display_name.as_deref())
        .await
    {
        warn!(room = %room_id, error = %e, "failed to report RSVP, keeping local entry");
    }
}

/// Best-effort display name; a failed lookup just means "no name".
async fn lookup_display_name(deps: &BridgeDeps, user_id: &str) -> Option<String> {
    match deps.directory.display_name(user_id).await {
        Ok(name) => name,
        Err(e) => {
            debug!(user = %user_id, error = %e, "display name lookup failed");
            None
        }
    }
}
