//! Remote admin check against the SSO service.
//!
//! Handlers and middleware only see the [`PermissionProvider`] trait; the
//! gRPC client and its retry policy live behind it.

pub mod client;
pub mod proto;
pub mod retry;

use async_trait::async_trait;
use thiserror::Error;

pub use client::SsoClient;
pub use retry::RetryPolicy;

#[derive(Debug, Error)]
pub enum SsoError {
    #[error("invalid sso address {address}: {source}")]
    InvalidEndpoint {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("grpc.IsAdmin: {0}")]
    Status(#[from] tonic::Status),
}

impl SsoError {
    /// gRPC code of the final attempt, if the call got that far
    pub fn code(&self) -> Option<tonic::Code> {
        match self {
            SsoError::Status(status) => Some(status.code()),
            SsoError::InvalidEndpoint { .. } => None,
        }
    }
}

/// Answers whether a user has admin rights.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn is_admin(&self, user_id: &str) -> Result<bool, SsoError>;
}
