// Main entry point for the Festa RSVP bridge

use anyhow::{Context, Result};
use bridge_core::kernel::{BridgeDeps, FestaAdapter, HomeserverClient};
use bridge_core::server::{build_app, worker};
use bridge_core::Config;
use festa::{FestaOptions, FestaService};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bridge_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Festa RSVP bridge");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Wire up collaborators
    let festa = Arc::new(
        FestaService::new(FestaOptions {
            api_url: config.festa_api_url.clone(),
            secret_key: config.festa_secret_key.clone(),
        })
        .context("Failed to create Festa client")?,
    );
    let homeserver = Arc::new(
        HomeserverClient::new(
            config.homeserver_url.clone(),
            config.homeserver_access_token.clone(),
        )
        .context("Failed to create homeserver client")?,
    );

    let deps = BridgeDeps::new(
        Arc::new(FestaAdapter::new(festa)),
        homeserver.clone(),
        homeserver,
        config.bot_user_id.clone(),
        config.festa_api_url.clone(),
    );

    // One bounded queue, one worker: events are handled in arrival order
    let (events_tx, events_rx) = mpsc::channel(1024);
    tokio::spawn(worker::run(events_rx, deps));

    // Start server
    let app = build_app(events_tx, config.webhook_token.clone());
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
