// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The RSVP
// handlers are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAttendanceService)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::rsvp::models::Status;

/// What the attendance service knows about a room's RSVP message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpMessageLookup {
    /// False when the room was never linked to an event.
    pub exists: bool,
    /// Set when a linked room already has its RSVP message chosen.
    pub rsvp_message_id: Option<String>,
}

// =============================================================================
// Attendance Service Trait (Infrastructure - the Festa API)
// =============================================================================

#[async_trait]
pub trait BaseAttendanceService: Send + Sync {
    /// Record `status` as the current RSVP of `user_id` for the event linked
    /// to `room_id`.
    async fn report_rsvp(
        &self,
        room_id: &str,
        user_id: &str,
        status: Status,
        display_name: Option<&str>,
    ) -> Result<()>;

    /// Ask which message collects RSVP reactions in `room_id`.
    async fn lookup_rsvp_message(&self, room_id: &str) -> Result<RsvpMessageLookup>;

    /// Record `event_id` as the room's RSVP message. Idempotent on the
    /// service side.
    async fn persist_rsvp_message(&self, room_id: &str, event_id: &str) -> Result<()>;
}

// =============================================================================
// Directory Trait (Infrastructure - display name lookups)
// =============================================================================

#[async_trait]
pub trait BaseDirectory: Send + Sync {
    /// Best-effort display name for a user. `Ok(None)` when the user has
    /// none set; callers treat errors the same way.
    async fn display_name(&self, user_id: &str) -> Result<Option<String>>;
}

// =============================================================================
// Chat Sink Trait (Infrastructure - outbound room messages)
// =============================================================================

#[async_trait]
pub trait BaseChatSink: Send + Sync {
    /// Post a plain notice into a room.
    async fn send_notice(&self, room_id: &str, body: &str) -> Result<()>;
}
