//! Thin client for the two homeserver calls the bridge makes itself:
//! display-name lookups and plain notices. Event delivery flows the other
//! way (appservice push into the webhook), so there is no sync loop here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::kernel::{BaseChatSink, BaseDirectory};

pub struct HomeserverClient {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct DisplayNameResponse {
    #[serde(default)]
    displayname: Option<String>,
}

impl HomeserverClient {
    pub fn new(base_url: String, access_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            access_token,
            client,
        })
    }
}

#[async_trait]
impl BaseDirectory for HomeserverClient {
    async fn display_name(&self, user_id: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/_matrix/client/v3/profile/{}/displayname",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Failed to fetch display name")?;

        // Users without a profile come back 404; that's just "no name".
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("Homeserver profile error {}", response.status());
        }

        let profile: DisplayNameResponse = response
            .json()
            .await
            .context("Failed to parse display name response")?;
        Ok(profile.displayname)
    }
}

#[async_trait]
impl BaseChatSink for HomeserverClient {
    async fn send_notice(&self, room_id: &str, body: &str) -> Result<()> {
        let txn_id = uuid::Uuid::new_v4();
        let url = format!(
            "{}/_matrix/client/v3/rooms/{}/send/m.room.message/{}",
            self.base_url,
            urlencoding::encode(room_id),
            txn_id
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({
                "msgtype": "m.notice",
                "body": body,
            }))
            .send()
            .await
            .context("Failed to send notice")?;

        if !response.status().is_success() {
            anyhow::bail!("Homeserver send error {}", response.status());
        }
        Ok(())
    }
}
