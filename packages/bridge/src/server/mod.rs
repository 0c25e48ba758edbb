// HTTP ingestion surface and the event worker
pub mod app;
pub mod routes;
pub mod worker;

pub use app::*;
