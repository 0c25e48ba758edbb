//! Inbound chat events, as pushed to the webhook by the homeserver-facing
//! appservice. The bridge does no protocol sync of its own; these shapes are
//! the entire ingestion contract.

use serde::{Deserialize, Serialize};

/// One event from the chat room stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    Reaction(ReactionEvent),
    Redaction(RedactionEvent),
    Membership(MembershipEvent),
}

impl ChatEvent {
    pub fn room_id(&self) -> &str {
        match self {
            ChatEvent::Reaction(e) => &e.room_id,
            ChatEvent::Redaction(e) => &e.room_id,
            ChatEvent::Membership(e) => &e.room_id,
        }
    }
}

/// A reaction placed on some message.
///
/// `relates_to` is optional on the wire; events without it are malformed and
/// dropped by the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub room_id: String,
    /// Id of the reaction event itself — the ledger key a later redaction
    /// will reference.
    pub event_id: String,
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<RelatesTo>,
}

/// What a reaction points at: the target message and the emoji.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatesTo {
    pub event_id: String,
    pub key: String,
}

/// A redaction withdrawing an earlier event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionEvent {
    pub room_id: String,
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacts: Option<String>,
}

/// A room membership change. Only joins and invites matter to the bridge;
/// everything else (leave, ban, knock) is ignored at dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipEvent {
    pub room_id: String,
    pub event_id: String,
    pub sender: String,
    /// The user whose membership changed (invitee on invites).
    pub state_key: String,
    pub membership: String,
}

impl MembershipEvent {
    pub fn is_join(&self) -> bool {
        self.membership == "join"
    }

    pub fn is_invite(&self) -> bool {
        self.membership == "invite"
    }
}
