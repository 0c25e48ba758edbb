//! The single consumer of the inbound event queue.
//!
//! One task owns all RSVP state and processes events strictly in arrival
//! order, finishing each handler (outbound calls included) before taking the
//! next event. Rooms interleave only between events, never within one, which
//! gives reconciliation the consistent ledger snapshot it depends on.

use tokio::sync::mpsc;
use tracing::debug;

use crate::domains::rsvp::events::ChatEvent;
use crate::domains::rsvp::handlers::handle_event;
use crate::domains::rsvp::store::RsvpState;
use crate::kernel::BridgeDeps;

pub async fn run(mut events_rx: mpsc::Receiver<ChatEvent>, deps: BridgeDeps) {
    let mut state = RsvpState::new();

    while let Some(event) = events_rx.recv().await {
        debug!(room = %event.room_id(), "processing event");
        handle_event(&mut state, &deps, &event).await;
    }

    debug!("event channel closed, worker exiting");
}
