//! Token minting for tests.

use std::time::{SystemTime, UNIX_EPOCH};

use url_shortener::{mint_access_token, AuthClaims, SecurityConfig};
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"integration_test_secret_do_not_use_in_prod";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn claims_for(uid: Uuid) -> AuthClaims {
    let iat = now_secs();
    AuthClaims {
        uid,
        email: "admin@example.com".to_string(),
        iat,
        exp: iat + 15 * 60,
    }
}

/// A token the test app will accept
pub fn valid_token(uid: Uuid) -> String {
    mint_access_token(&claims_for(uid), &test_security()).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Signed with a different secret
pub fn foreign_token(uid: Uuid) -> String {
    mint_access_token(&claims_for(uid), &SecurityConfig::new(b"someone-else".to_vec())).unwrap()
}

pub fn expired_token(uid: Uuid) -> String {
    let mut claims = claims_for(uid);
    claims.iat -= 3600;
    claims.exp = claims.iat + 60;
    mint_access_token(&claims, &test_security()).unwrap()
}
