//! End-to-end handler scenarios against the kernel mocks: the bootstrap
//! paths for the RSVP message, the ledger flows, and the reconciliation
//! behavior after retractions.

use std::sync::Arc;

use bridge_core::domains::rsvp::events::{
    ChatEvent, MembershipEvent, ReactionEvent, RedactionEvent, RelatesTo,
};
use bridge_core::domains::rsvp::handlers::handle_event;
use bridge_core::domains::rsvp::models::Status;
use bridge_core::domains::rsvp::store::RsvpState;
use bridge_core::kernel::{BridgeDeps, MockAttendanceService, MockChatSink, MockDirectory};

const ROOM: &str = "!party:example.org";
const ALICE: &str = "@alice:example.org";
const BOT: &str = "@festabot:example.org";

struct Harness {
    state: RsvpState,
    deps: BridgeDeps,
    attendance: Arc<MockAttendanceService>,
    directory: Arc<MockDirectory>,
    chat: Arc<MockChatSink>,
}

impl Harness {
    fn new(attendance: MockAttendanceService) -> Self {
        let attendance = Arc::new(attendance);
        let directory = Arc::new(MockDirectory::new());
        let chat = Arc::new(MockChatSink::new());
        let deps = BridgeDeps::new(
            attendance.clone(),
            directory.clone(),
            chat.clone(),
            BOT.to_string(),
            "https://festa.example".to_string(),
        );
        Self {
            state: RsvpState::new(),
            deps,
            attendance,
            directory,
            chat,
        }
    }

    async fn push(&mut self, event: ChatEvent) {
        handle_event(&mut self.state, &self.deps, &event).await;
    }
}

fn reaction(event_id: &str, sender: &str, target: &str, key: &str) -> ChatEvent {
    ChatEvent::Reaction(ReactionEvent {
        room_id: ROOM.to_string(),
        event_id: event_id.to_string(),
        sender: sender.to_string(),
        relates_to: Some(RelatesTo {
            event_id: target.to_string(),
            key: key.to_string(),
        }),
    })
}

fn redaction(redacts: &str) -> ChatEvent {
    ChatEvent::Redaction(RedactionEvent {
        room_id: ROOM.to_string(),
        sender: ALICE.to_string(),
        redacts: Some(redacts.to_string()),
    })
}

fn invite(event_id: &str, invitee: &str) -> ChatEvent {
    ChatEvent::Membership(MembershipEvent {
        room_id: ROOM.to_string(),
        event_id: event_id.to_string(),
        sender: "@host:example.org".to_string(),
        state_key: invitee.to_string(),
        membership: "invite".to_string(),
    })
}

// Scenario: linked room with no RSVP message yet — the first qualifying
// reaction nominates its target message and reports its status.
#[tokio::test]
async fn first_reaction_nominates_the_rsvp_message() {
    let mut h = Harness::new(MockAttendanceService::new().with_linked_room_no_message());

    h.push(reaction("$r1", ALICE, "$msg", "👍")).await;

    assert!(h.attendance.was_persisted(ROOM, "$msg"));
    assert_eq!(h.state.rsvp_message_id(ROOM), Some("$msg"));
    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Going));
    assert_eq!(h.state.reactions_in_room(ROOM).unwrap().len(), 1);
}

// Scenario: Festa already knows the RSVP message — adopt it, and a reaction
// on any other message changes nothing.
#[tokio::test]
async fn reaction_off_the_rsvp_message_is_ignored() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));

    h.push(reaction("$r1", ALICE, "$other", "👍")).await;

    // Lookup ran and the known id was adopted, but nothing was tracked or
    // reported for a reaction elsewhere.
    assert_eq!(h.state.rsvp_message_id(ROOM), Some("$rsvpmsg"));
    assert!(h.state.reactions_in_room(ROOM).is_none());
    assert_eq!(h.attendance.report_count(), 0);
    assert_eq!(h.attendance.persisted().len(), 0);
}

// Scenario: double-react without retracting, then redact the first —
// the surviving signal becomes the reported status.
#[tokio::test]
async fn redacting_one_of_two_reactions_reveals_the_other() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));

    h.push(reaction("$e1", ALICE, "$rsvpmsg", "👍")).await;
    h.push(reaction("$e2", ALICE, "$rsvpmsg", "👎")).await;
    assert_eq!(h.state.reactions_in_room(ROOM).unwrap().len(), 2);

    h.push(redaction("$e1")).await;

    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::NotGoing));
    let remaining = h.state.reactions_in_room(ROOM).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].source_event_id, "$e2");
}

// Scenario: retracting the only reaction reverts the sender to invited.
#[tokio::test]
async fn redacting_the_only_reaction_reverts_to_invited() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));

    h.push(reaction("$e1", ALICE, "$rsvpmsg", "🤔")).await;
    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Maybe));

    h.push(redaction("$e1")).await;

    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Invited));
    assert_eq!(h.state.reactions_in_room(ROOM).unwrap().len(), 0);
}

// Scenario: a redaction for an id we never tracked is a quiet no-op.
#[tokio::test]
async fn unrelated_redaction_is_a_noop() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));

    h.push(invite("$inv1", ALICE)).await;
    let reports_after_invite = h.attendance.report_count();

    h.push(redaction("$unrelated")).await;

    assert_eq!(h.attendance.report_count(), reports_after_invite);
    assert_eq!(h.state.reactions_in_room(ROOM).unwrap().len(), 1);
}

// Scenario: a redaction in a room with no ledger at all doesn't even flinch.
#[tokio::test]
async fn redaction_in_untracked_room_is_a_noop() {
    let mut h = Harness::new(MockAttendanceService::new());

    h.push(redaction("$whatever")).await;

    assert_eq!(h.attendance.report_count(), 0);
    assert!(h.state.reactions_in_room(ROOM).is_none());
}

// Three or more live signals stay ambiguous: no report, entry still removed.
#[tokio::test]
async fn ambiguous_retraction_reports_nothing_but_still_removes() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));

    h.push(reaction("$e1", ALICE, "$rsvpmsg", "👍")).await;
    h.push(reaction("$e2", ALICE, "$rsvpmsg", "👎")).await;
    h.push(reaction("$e3", ALICE, "$rsvpmsg", "🤔")).await;
    let reports_before = h.attendance.report_count();

    h.push(redaction("$e1")).await;

    assert_eq!(h.attendance.report_count(), reports_before);
    assert_eq!(h.state.reactions_in_room(ROOM).unwrap().len(), 2);
}

// An invite in a linked room seeds the ledger and reports invited; the seed
// doesn't confuse later reconciliation.
#[tokio::test]
async fn invite_seeds_ledger_then_reaction_and_retraction_reconcile() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));
    h.directory.set_name(ALICE, "Alice");

    h.push(invite("$inv1", ALICE)).await;
    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Invited));
    assert_eq!(
        h.attendance.reports()[0].display_name.as_deref(),
        Some("Alice")
    );

    h.push(reaction("$e1", ALICE, "$rsvpmsg", "👍")).await;
    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Going));
    assert_eq!(h.state.reactions_in_room(ROOM).unwrap().len(), 2);

    h.push(redaction("$e1")).await;
    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Invited));
}

// An invite in an unlinked room is not tracked or reported.
#[tokio::test]
async fn invite_in_unlinked_room_is_ignored() {
    let mut h = Harness::new(MockAttendanceService::new());

    h.push(invite("$inv1", ALICE)).await;

    assert_eq!(h.attendance.report_count(), 0);
    assert!(h.state.reactions_in_room(ROOM).is_none());
}

// The invite bootstrap adopts a remotely-known RSVP message id, so the next
// reaction skips the lookup entirely.
#[tokio::test]
async fn invite_bootstrap_adopts_known_rsvp_message() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));

    h.push(invite("$inv1", ALICE)).await;
    assert_eq!(h.state.rsvp_message_id(ROOM), Some("$rsvpmsg"));
    assert_eq!(h.attendance.lookup_count(), 1);

    h.push(reaction("$e1", ALICE, "$rsvpmsg", "👍")).await;
    assert_eq!(h.attendance.lookup_count(), 1);
    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Going));
}

// Display names are re-fetched at redaction time, not reused from the
// original reaction.
#[tokio::test]
async fn redaction_report_uses_the_current_display_name() {
    let mut h = Harness::new(MockAttendanceService::new().with_known_rsvp_message("$rsvpmsg"));
    h.directory.set_name(ALICE, "Alice");

    h.push(reaction("$e1", ALICE, "$rsvpmsg", "👍")).await;
    h.directory.set_name(ALICE, "Alice Renamed");

    h.push(redaction("$e1")).await;

    let last = h.attendance.reports().last().cloned().unwrap();
    assert_eq!(last.status, Status::Invited);
    assert_eq!(last.display_name.as_deref(), Some("Alice Renamed"));
}

// An unlinked room is retried on the next qualifying reaction, and links
// established in the meantime take effect.
#[tokio::test]
async fn unlinked_room_is_retried_on_next_reaction() {
    let mut h = Harness::new(
        MockAttendanceService::new()
            .with_lookup(bridge_core::kernel::RsvpMessageLookup {
                exists: false,
                rsvp_message_id: None,
            })
            .with_linked_room_no_message(),
    );

    h.push(reaction("$e1", ALICE, "$msg", "👍")).await;
    assert_eq!(h.attendance.report_count(), 0);
    assert_eq!(h.state.rsvp_message_id(ROOM), None);

    // The room got linked on Festa since; same user reacts again.
    h.push(reaction("$e2", ALICE, "$msg", "👍")).await;
    assert_eq!(h.state.rsvp_message_id(ROOM), Some("$msg"));
    assert_eq!(h.attendance.last_status_for(ALICE), Some(Status::Going));
}

// The bridge's own join greets the room without touching RSVP state.
#[tokio::test]
async fn own_join_greets_and_tracks_nothing() {
    let mut h = Harness::new(MockAttendanceService::new());

    h.push(ChatEvent::Membership(MembershipEvent {
        room_id: ROOM.to_string(),
        event_id: "$j1".to_string(),
        sender: BOT.to_string(),
        state_key: BOT.to_string(),
        membership: "join".to_string(),
    }))
    .await;

    assert!(h.chat.was_notified(ROOM));
    assert_eq!(h.attendance.report_count(), 0);
    assert_eq!(h.attendance.lookup_count(), 0);
    assert!(h.state.reactions_in_room(ROOM).is_none());
}
