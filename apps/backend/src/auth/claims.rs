//! Identity claims carried by access tokens issued by the SSO service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decoded access token claims.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthClaims {
    /// Opaque user identifier assigned by the SSO service
    pub uid: Uuid,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
