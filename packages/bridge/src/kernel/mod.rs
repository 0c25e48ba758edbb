//! Kernel module - bridge infrastructure and dependencies.

pub mod deps;
pub mod homeserver_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::{BridgeDeps, FestaAdapter};
pub use homeserver_client::HomeserverClient;
pub use test_dependencies::{MockAttendanceService, MockChatSink, MockDirectory};
pub use traits::*;
