use std::future::Future;
use std::time::Duration;

use tonic::{Code, Status};
use tracing::debug;

/// Default number of attempts per call
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(4);
const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(50);

/// Bounded retry with a per-attempt deadline and linear backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempt_timeout,
            ..Self::default()
        }
    }

    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    /// Codes worth another attempt; everything else is final.
    pub fn is_retryable(code: Code) -> bool {
        matches!(code, Code::NotFound | Code::Aborted | Code::DeadlineExceeded)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable status, or the
    /// attempt budget is spent. `op` receives the 1-based attempt number.
    ///
    /// An attempt that outlives `attempt_timeout` is abandoned and counts as
    /// `DeadlineExceeded`.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, Status>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, Status>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = tokio::time::timeout(self.attempt_timeout, op(attempt))
                .await
                .unwrap_or_else(|_| {
                    Err(Status::deadline_exceeded(format!(
                        "attempt {attempt} timed out after {:?}",
                        self.attempt_timeout
                    )))
                });

            let status = match result {
                Ok(value) => return Ok(value),
                Err(status) => status,
            };

            if attempt >= max_attempts || !Self::is_retryable(status.code()) {
                return Err(status);
            }

            debug!(
                attempt,
                max_attempts,
                code = ?status.code(),
                message = %status.message(),
                "retrying grpc call"
            );
            tokio::time::sleep(self.backoff_step * attempt).await;
            attempt += 1;
        }
    }
}
