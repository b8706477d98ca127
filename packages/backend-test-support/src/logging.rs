//! Test logging.
//!
//! Unit tests (through `#[ctor]` in the backend's `lib.rs`) and every
//! integration test binary call [`init`]; only the first call installs a
//! subscriber.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Quiet by default; request and SSO logs are opt-in via `TEST_LOG`.
pub const DEFAULT_TEST_FILTER: &str = "warn";

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Pick the filter directive: `TEST_LOG` wins over `RUST_LOG`, and blank
/// values are ignored.
pub fn filter_directive(test_log: Option<String>, rust_log: Option<String>) -> String {
    [test_log, rust_log]
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEST_FILTER.to_string())
}

pub fn init() {
    INSTALLED.get_or_init(|| {
        let directive = filter_directive(
            std::env::var("TEST_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        );
        let filter =
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        // Another subscriber may already be installed by the test harness.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init();
    });
}
