//! Bridge dependencies for the event handlers (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! handler invocation. All external services sit behind trait abstractions
//! so tests can swap in the mocks from `test_dependencies`.

use anyhow::Result;
use async_trait::async_trait;
use festa::FestaService;
use std::sync::Arc;

use crate::domains::rsvp::models::Status;
use crate::kernel::{BaseAttendanceService, BaseChatSink, BaseDirectory, RsvpMessageLookup};

// =============================================================================
// FestaService Adapter (implements BaseAttendanceService trait)
// =============================================================================

/// Wrapper around FestaService that implements the BaseAttendanceService trait
pub struct FestaAdapter(pub Arc<FestaService>);

impl FestaAdapter {
    pub fn new(service: Arc<FestaService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseAttendanceService for FestaAdapter {
    async fn report_rsvp(
        &self,
        room_id: &str,
        user_id: &str,
        status: Status,
        display_name: Option<&str>,
    ) -> Result<()> {
        self.0
            .report_rsvp(room_id, user_id, status.as_str(), display_name)
            .await
            .map_err(anyhow::Error::from)
    }

    async fn lookup_rsvp_message(&self, room_id: &str) -> Result<RsvpMessageLookup> {
        let response = self.0.fetch_rsvp_message_id(room_id).await?;
        Ok(RsvpMessageLookup {
            exists: response.event_exists_for_room,
            rsvp_message_id: response.rsvp_message_id,
        })
    }

    async fn persist_rsvp_message(&self, room_id: &str, event_id: &str) -> Result<()> {
        self.0
            .set_rsvp_message_id(room_id, event_id)
            .await
            .map_err(anyhow::Error::from)
    }
}

// =============================================================================
// BridgeDeps
// =============================================================================

/// Dependencies accessible to the event handlers
#[derive(Clone)]
pub struct BridgeDeps {
    pub attendance: Arc<dyn BaseAttendanceService>,
    pub directory: Arc<dyn BaseDirectory>,
    pub chat: Arc<dyn BaseChatSink>,
    /// The bridge's own user id; its membership events are never tracked.
    pub bot_user_id: String,
    /// Festa base URL, used for link-this-chat text in welcome notices.
    pub festa_url: String,
}

impl BridgeDeps {
    pub fn new(
        attendance: Arc<dyn BaseAttendanceService>,
        directory: Arc<dyn BaseDirectory>,
        chat: Arc<dyn BaseChatSink>,
        bot_user_id: String,
        festa_url: String,
    ) -> Self {
        Self {
            attendance,
            directory,
            chat,
            bot_user_id,
            festa_url,
        }
    }
}
