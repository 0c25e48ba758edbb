//! Application setup and router configuration.

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use crate::domains::rsvp::events::ChatEvent;
use crate::server::routes::{events_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub events_tx: mpsc::Sender<ChatEvent>,
    pub webhook_token: String,
}

pub fn build_app(events_tx: mpsc::Sender<ChatEvent>, webhook_token: String) -> Router {
    let state = AppState {
        events_tx,
        webhook_token,
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/events", post(events_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
