#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod realtime;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::table::TableConfig;
pub use error::{AppError, Problem};
pub use infra::state::build_state;
pub use realtime::{TableEvent, TableEventHub};
pub use services::players::{InMemoryDirectory, PlayerDirectory, PlayerProfile};
pub use services::table_flow::TableFlowService;
pub use state::app_state::AppState;

// Prelude for test convenience
pub mod prelude {
    pub use super::config::table::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::realtime::*;
    pub use super::services::players::*;
    pub use super::services::table_flow::*;
    pub use super::state::app_state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    okey_test_support::logging::init();
}
