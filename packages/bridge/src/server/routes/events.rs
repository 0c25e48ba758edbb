//! Webhook where the homeserver-facing appservice pushes chat events.

use axum::{
    extract::Extension,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domains::rsvp::events::ChatEvent;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct EventsResponse {
    accepted: usize,
}

/// Accept a batch of chat events and queue them for the worker.
///
/// Auth is a bearer token shared with the appservice. The queue is bounded,
/// so a slow worker backpressures the push rather than growing memory.
pub async fn events_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(events): Json<Vec<ChatEvent>>,
) -> (StatusCode, Json<EventsResponse>) {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token == state.webhook_token)
        .unwrap_or(false);

    if !authorized {
        warn!("rejected event push with missing or bad token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(EventsResponse { accepted: 0 }),
        );
    }

    let mut accepted = 0;
    for event in events {
        match state.events_tx.send(event).await {
            Ok(()) => accepted += 1,
            Err(e) => {
                warn!(error = %e, "event queue closed, dropping remaining events");
                break;
            }
        }
    }

    debug!(accepted, "queued chat events");
    (StatusCode::OK, Json(EventsResponse { accepted }))
}
