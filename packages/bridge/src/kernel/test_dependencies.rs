// Mock implementations for testing
//
// Provides mock services that can be injected into BridgeDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domains::rsvp::models::Status;
use crate::kernel::{BaseAttendanceService, BaseChatSink, BaseDirectory, RsvpMessageLookup};

// =============================================================================
// Mock Attendance Service
// =============================================================================

/// Arguments captured from a report_rsvp call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedRsvp {
    pub room_id: String,
    pub user_id: String,
    pub status: Status,
    pub display_name: Option<String>,
}

pub struct MockAttendanceService {
    lookup_responses: Arc<Mutex<Vec<RsvpMessageLookup>>>,
    lookup_calls: Arc<Mutex<Vec<String>>>,
    reports: Arc<Mutex<Vec<ReportedRsvp>>>,
    persisted: Arc<Mutex<Vec<(String, String)>>>,
    fail_reports: bool,
    fail_lookups: bool,
}

impl MockAttendanceService {
    pub fn new() -> Self {
        Self {
            lookup_responses: Arc::new(Mutex::new(Vec::new())),
            lookup_calls: Arc::new(Mutex::new(Vec::new())),
            reports: Arc::new(Mutex::new(Vec::new())),
            persisted: Arc::new(Mutex::new(Vec::new())),
            fail_reports: false,
            fail_lookups: false,
        }
    }

    /// Queue a lookup response. When the queue runs dry, lookups answer
    /// "room not linked".
    pub fn with_lookup(self, lookup: RsvpMessageLookup) -> Self {
        self.lookup_responses.lock().unwrap().push(lookup);
        self
    }

    /// Queue a "linked, RSVP message already chosen" lookup response.
    pub fn with_known_rsvp_message(self, event_id: &str) -> Self {
        self.with_lookup(RsvpMessageLookup {
            exists: true,
            rsvp_message_id: Some(event_id.to_string()),
        })
    }

    /// Queue a "linked, but no RSVP message chosen yet" lookup response.
    pub fn with_linked_room_no_message(self) -> Self {
        self.with_lookup(RsvpMessageLookup {
            exists: true,
            rsvp_message_id: None,
        })
    }

    /// Make every report_rsvp call fail.
    pub fn with_failing_reports(mut self) -> Self {
        self.fail_reports = true;
        self
    }

    /// Make every lookup_rsvp_message call fail.
    pub fn with_failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    /// Get all recorded reports
    pub fn reports(&self) -> Vec<ReportedRsvp> {
        self.reports.lock().unwrap().clone()
    }

    pub fn report_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    /// Last status reported for a user, if any
    pub fn last_status_for(&self, user_id: &str) -> Option<Status> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.user_id == user_id)
            .map(|r| r.status)
    }

    /// Get all (room_id, event_id) pairs persisted as RSVP messages
    pub fn persisted(&self) -> Vec<(String, String)> {
        self.persisted.lock().unwrap().clone()
    }

    pub fn was_persisted(&self, room_id: &str, event_id: &str) -> bool {
        self.persisted
            .lock()
            .unwrap()
            .iter()
            .any(|(r, e)| r == room_id && e == event_id)
    }

    pub fn lookup_count(&self) -> usize {
        self.lookup_calls.lock().unwrap().len()
    }
}

impl Default for MockAttendanceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAttendanceService for MockAttendanceService {
    async fn report_rsvp(
        &self,
        room_id: &str,
        user_id: &str,
        status: Status,
        display_name: Option<&str>,
    ) -> Result<()> {
        if self.fail_reports {
            anyhow::bail!("mock report failure");
        }
        self.reports.lock().unwrap().push(ReportedRsvp {
            room_id: room_id.to_string(),
            user_id: user_id.to_string(),
            status,
            display_name: display_name.map(str::to_string),
        });
        Ok(())
    }

    async fn lookup_rsvp_message(&self, room_id: &str) -> Result<RsvpMessageLookup> {
        self.lookup_calls.lock().unwrap().push(room_id.to_string());
        if self.fail_lookups {
            anyhow::bail!("mock lookup failure");
        }

        let mut responses = self.lookup_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(RsvpMessageLookup {
                exists: false,
                rsvp_message_id: None,
            })
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn persist_rsvp_message(&self, room_id: &str, event_id: &str) -> Result<()> {
        self.persisted
            .lock()
            .unwrap()
            .push((room_id.to_string(), event_id.to_string()));
        Ok(())
    }
}

// =============================================================================
// Mock Directory
// =============================================================================

#[derive(Default)]
pub struct MockDirectory {
    names: Mutex<HashMap<String, String>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(self, user_id: &str, display_name: &str) -> Self {
        self.set_name(user_id, display_name);
        self
    }

    /// Change a name after construction, for tests covering re-fetches.
    pub fn set_name(&self, user_id: &str, display_name: &str) {
        self.names
            .lock()
            .unwrap()
            .insert(user_id.to_string(), display_name.to_string());
    }
}

#[async_trait]
impl BaseDirectory for MockDirectory {
    async fn display_name(&self, user_id: &str) -> Result<Option<String>> {
        Ok(self.names.lock().unwrap().get(user_id).cloned())
    }
}

// =============================================================================
// Mock Chat Sink
// =============================================================================

#[derive(Default)]
pub struct MockChatSink {
    notices: Mutex<Vec<(String, String)>>,
}

impl MockChatSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all (room_id, body) notices sent
    pub fn notices(&self) -> Vec<(String, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn was_notified(&self, room_id: &str) -> bool {
        self.notices.lock().unwrap().iter().any(|(r, _)| r == room_id)
    }
}

#[async_trait]
impl BaseChatSink for MockChatSink {
    async fn send_notice(&self, room_id: &str, body: &str) -> Result<()> {
        self.notices
            .lock()
            .unwrap()
            .push((room_id.to_string(), body.to_string()));
        Ok(())
    }
}
