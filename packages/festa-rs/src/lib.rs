//! Client for the Festa event-management API.
//!
//! Festa stores a single current RSVP status per guest per event. The bridge
//! talks to it through three endpoints: submit an RSVP on behalf of a chat
//! user, look up which message in a room collects RSVP reactions (and whether
//! the room is linked to an event at all), and record that message once one
//! has been chosen. Every request is authenticated by a shared secret carried
//! in the payload.

pub mod models;

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    FetchRsvpMessageIdRequest, FetchRsvpMessageIdResponse, RsvpPayload, SetRsvpMessageIdRequest,
};

#[derive(Debug, Error)]
pub enum FestaError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Festa returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct FestaOptions {
    /// Base URL of the Festa deployment, without a trailing slash.
    pub api_url: String,
    /// Shared secret sent with every request.
    pub secret_key: String,
}

#[derive(Debug, Clone)]
pub struct FestaService {
    options: FestaOptions,
    client: Client,
}

impl FestaService {
    pub fn new(options: FestaOptions) -> Result<Self, FestaError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { options, client })
    }

    /// Submit an RSVP status for a chat user.
    pub async fn report_rsvp(
        &self,
        room_id: &str,
        username: &str,
        status: &str,
        displayname: Option<&str>,
    ) -> Result<(), FestaError> {
        let payload = RsvpPayload {
            secret_matrix_bot_key: self.options.secret_key.clone(),
            status: status.to_string(),
            matrix_username: username.to_string(),
            displayname: displayname.map(str::to_string),
            matrix_room_address: room_id.to_string(),
        };
        self.post_json("/api/rsvp-via-matrix", &payload).await?;
        Ok(())
    }

    /// Look up the RSVP message for a room.
    pub async fn fetch_rsvp_message_id(
        &self,
        room_id: &str,
    ) -> Result<FetchRsvpMessageIdResponse, FestaError> {
        let payload = FetchRsvpMessageIdRequest {
            secret_matrix_bot_key: self.options.secret_key.clone(),
            matrix_room_address: room_id.to_string(),
        };
        let response = self.post_json("/api/rsvp-message-id-for-room", &payload).await?;
        let parsed: FetchRsvpMessageIdResponse = response
            .json()
            .await
            .map_err(|e| FestaError::Parse(e.to_string()))?;
        if parsed.status != "success" {
            return Err(FestaError::Parse(format!(
                "status field was {:?}, expected \"success\"",
                parsed.status
            )));
        }
        Ok(parsed)
    }

    /// Record which message collects RSVP reactions in a room.
    pub async fn set_rsvp_message_id(
        &self,
        room_id: &str,
        rsvp_message_id: &str,
    ) -> Result<(), FestaError> {
        let payload = SetRsvpMessageIdRequest {
            secret_matrix_bot_key: self.options.secret_key.clone(),
            room_id: room_id.to_string(),
            rsvp_message_id: rsvp_message_id.to_string(),
        };
        self.post_json("/api/set-rsvp-message-id-via-matrix", &payload)
            .await?;
        Ok(())
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, FestaError> {
        let url = format!("{}{}", self.options.api_url, path);
        tracing::debug!(%path, "sending request to Festa");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FestaError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
