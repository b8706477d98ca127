//! Task-local trace context for web requests.
//!
//! `RequestTrace` scopes every request future with its request id so that
//! code deep in the pipeline (error rendering, db error mapping) can tag
//! log events and responses without threading the id through arguments.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Placeholder used outside of a request scope.
pub const UNKNOWN: &str = "unknown";

/// The current request's trace id, if any.
pub fn current() -> Option<String> {
    TRACE_ID.try_with(Clone::clone).ok()
}

/// The current request's trace id, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN.to_string())
}

/// Run a future within a trace context.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
