use std::fmt;

use jsonwebtoken::Algorithm;

/// Configuration for JWT verification
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared secret the identity service signs access tokens with
    pub jwt_secret: Vec<u8>,
    /// Accepted signing algorithms (HMAC family only)
    pub algorithms: Vec<Algorithm>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithms: vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512],
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_key_for_testing_purposes_only".to_vec())
    }
}

// The secret must never reach the logs, not even through `{:?}`.
impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithms", &self.algorithms)
            .finish()
    }
}
