//! RSVP domain — reaction ledger, RSVP-message registry, reconciliation and
//! the event handlers that drive them.

pub mod events;
pub mod handlers;
pub mod models;
pub mod reconcile;
pub mod store;

pub use events::*;
pub use models::*;
pub use store::*;
