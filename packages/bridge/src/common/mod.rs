// Small helpers shared across the application

pub mod utils;

pub use utils::*;
