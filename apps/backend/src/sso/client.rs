use async_trait::async_trait;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tracing::{info, warn};

use super::proto::{IsAdminRequest, IsAdminResponse, IS_ADMIN_PATH};
use super::{PermissionProvider, RetryPolicy, SsoError};

/// gRPC client for the SSO `auth.Auth` service.
///
/// The underlying channel connects lazily on first use and is shared by
/// every clone of the client.
#[derive(Debug, Clone)]
pub struct SsoClient {
    grpc: tonic::client::Grpc<Channel>,
    policy: RetryPolicy,
}

impl SsoClient {
    /// Creates a client without dialing. Addresses without a scheme are
    /// treated as plaintext `http://`.
    pub fn connect_lazy(address: &str, policy: RetryPolicy) -> Result<Self, SsoError> {
        let uri = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };

        let endpoint = Endpoint::from_shared(uri.clone()).map_err(|source| {
            SsoError::InvalidEndpoint {
                address: uri,
                source,
            }
        })?;

        Ok(Self {
            grpc: tonic::client::Grpc::new(endpoint.connect_lazy()),
            policy,
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn call_is_admin(&self, message: IsAdminRequest) -> Result<IsAdminResponse, Status> {
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("sso channel not ready: {e}")))?;

        let mut request = Request::new(message);
        request.set_timeout(self.policy.attempt_timeout);

        grpc.unary(
            request,
            PathAndQuery::from_static(IS_ADMIN_PATH),
            ProstCodec::default(),
        )
        .await
        .map(tonic::Response::into_inner)
    }
}

#[async_trait]
impl PermissionProvider for SsoClient {
    async fn is_admin(&self, user_id: &str) -> Result<bool, SsoError> {
        let message = IsAdminRequest {
            user_id: user_id.to_string(),
        };

        let response = self
            .policy
            .run(|attempt| {
                let message = message.clone();
                async move {
                    info!(method = IS_ADMIN_PATH, attempt, payload = ?message, "grpc request");
                    let result = self.call_is_admin(message).await;
                    match &result {
                        Ok(response) => {
                            info!(method = IS_ADMIN_PATH, attempt, payload = ?response, "grpc response")
                        }
                        Err(status) => info!(
                            method = IS_ADMIN_PATH,
                            attempt,
                            code = ?status.code(),
                            message = %status.message(),
                            "grpc response"
                        ),
                    }
                    result
                }
            })
            .await
            .map_err(|status| {
                warn!(code = ?status.code(), "admin check failed");
                SsoError::Status(status)
            })?;

        Ok(response.is_admin)
    }
}
