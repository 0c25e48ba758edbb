use serde::{Deserialize, Serialize};

/// Body for `/api/rsvp-via-matrix` — one status update for one guest.
#[derive(Debug, Clone, Serialize)]
pub struct RsvpPayload {
    /// Shared secret proving the request comes from the bridge.
    pub secret_matrix_bot_key: String,
    pub status: String,
    pub matrix_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
    pub matrix_room_address: String,
}

/// Body for `/api/rsvp-message-id-for-room`.
#[derive(Debug, Clone, Serialize)]
pub struct FetchRsvpMessageIdRequest {
    pub secret_matrix_bot_key: String,
    pub matrix_room_address: String,
}

/// Response for `/api/rsvp-message-id-for-room`.
///
/// `event_exists_for_room` is false when the room has never been linked to a
/// Festa event. A linked room may still have no RSVP message chosen yet, in
/// which case `rsvp_message_id` is null.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchRsvpMessageIdResponse {
    pub status: String,
    pub rsvp_message_id: Option<String>,
    pub event_exists_for_room: bool,
}

/// Body for `/api/set-rsvp-message-id-via-matrix`.
#[derive(Debug, Clone, Serialize)]
pub struct SetRsvpMessageIdRequest {
    pub secret_matrix_bot_key: String,
    pub room_id: String,
    pub rsvp_message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsvp_payload_omits_missing_displayname() {
        let payload = RsvpPayload {
            secret_matrix_bot_key: "s3cret".to_string(),
            status: "going".to_string(),
            matrix_username: "@alice:example.org".to_string(),
            displayname: None,
            matrix_room_address: "!room:example.org".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("displayname").is_none());
        assert_eq!(json["status"], "going");
        assert_eq!(json["matrix_room_address"], "!room:example.org");
    }

    #[test]
    fn test_rsvp_payload_includes_displayname_when_present() {
        let payload = RsvpPayload {
            secret_matrix_bot_key: "s3cret".to_string(),
            status: "maybe".to_string(),
            matrix_username: "@alice:example.org".to_string(),
            displayname: Some("Alice".to_string()),
            matrix_room_address: "!room:example.org".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["displayname"], "Alice");
    }

    #[test]
    fn test_lookup_response_with_null_message_id() {
        let body = r#"{
            "status": "success",
            "rsvp_message_id": null,
            "event_exists_for_room": true
        }"#;

        let parsed: FetchRsvpMessageIdResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "success");
        assert!(parsed.rsvp_message_id.is_none());
        assert!(parsed.event_exists_for_room);
    }

    #[test]
    fn test_lookup_response_with_known_message_id() {
        let body = r#"{
            "status": "success",
            "rsvp_message_id": "$rsvpmsg",
            "event_exists_for_room": true
        }"#;

        let parsed: FetchRsvpMessageIdResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rsvp_message_id.as_deref(), Some("$rsvpmsg"));
    }
}
