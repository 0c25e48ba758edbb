use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub festa_api_url: String,
    pub festa_secret_key: String,
    pub homeserver_url: String,
    pub homeserver_access_token: String,
    pub bot_user_id: String,
    pub webhook_token: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            festa_api_url: env::var("FESTA_API_URL")
                .context("FESTA_API_URL must be set")?,
            festa_secret_key: env::var("FESTA_API_SECRET_KEY")
                .context("FESTA_API_SECRET_KEY must be set")?,
            homeserver_url: env::var("MATRIX_HOMESERVER_URL")
                .context("MATRIX_HOMESERVER_URL must be set")?,
            homeserver_access_token: env::var("MATRIX_ACCESS_TOKEN")
                .context("MATRIX_ACCESS_TOKEN must be set")?,
            bot_user_id: env::var("MATRIX_BOT_USER_ID")
                .context("MATRIX_BOT_USER_ID must be set")?,
            webhook_token: env::var("BRIDGE_WEBHOOK_TOKEN")
                .context("BRIDGE_WEBHOOK_TOKEN must be set")?,
        })
    }
}
