#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod sso;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod utils;

// Re-exports for public API
pub use auth::{mint_access_token, verify_access_token, AuthClaims, AuthorizationOutcome};
pub use config::AppConfig;
pub use error::AppError;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{Authorization, RequestTrace, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
