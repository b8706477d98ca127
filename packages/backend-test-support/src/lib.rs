//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: logging
//! initialization, response envelope assertions and unique test data.

pub mod envelope;
pub mod logging;
pub mod unique_helpers;
