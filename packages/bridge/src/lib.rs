// Festa RSVP bridge
//
// Watches reaction events in chat rooms and forwards RSVP intent to the
// Festa event service. Reactions on a room's designated RSVP message map to
// attendance statuses; retracting a reaction reconciles the sender back to
// whatever signal remains.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
