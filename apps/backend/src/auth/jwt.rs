use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::auth::claims::AuthClaims;
use crate::state::security_config::SecurityConfig;

/// Why a bearer token was rejected.
///
/// All kinds are equivalent for authorization purposes; they exist so the
/// middleware can log something more useful than "invalid token".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token issued in the future")]
    IssuedInFuture,
    #[error("malformed token")]
    Malformed,
}

/// Verify a JWT and return its claims.
///
/// Errors:
/// - Expired token → `TokenError::Expired`
/// - Signature mismatch → `TokenError::InvalidSignature`
/// - `iat` later than now → `TokenError::IssuedInFuture`
/// - Anything else (bad structure, unsupported algorithm, missing claims) → `TokenError::Malformed`
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<AuthClaims, TokenError> {
    verify_access_token_at(token, security, SystemTime::now())
}

pub(crate) fn verify_access_token_at(
    token: &str,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<AuthClaims, TokenError> {
    let first = security
        .algorithms
        .first()
        .copied()
        .ok_or(TokenError::Malformed)?;
    let mut validation = Validation::new(first);
    validation.algorithms = security.algorithms.clone();
    validation.leeway = 0;

    let claims = decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::Malformed)?
        .as_secs() as i64;
    if claims.iat > now_secs {
        return Err(TokenError::IssuedInFuture);
    }

    Ok(claims)
}

/// Sign claims with the first configured algorithm.
///
/// Tokens are normally issued by the SSO service; this exists for tooling
/// and tests that need a token the service will accept.
pub fn mint_access_token(
    claims: &AuthClaims,
    security: &SecurityConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let alg = security
        .algorithms
        .first()
        .copied()
        .unwrap_or(jsonwebtoken::Algorithm::HS256);
    encode(
        &Header::new(alg),
        claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
}
