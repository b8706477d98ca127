pub mod claims;
pub mod jwt;
pub mod outcome;

pub use claims::AuthClaims;
pub use jwt::{mint_access_token, verify_access_token, TokenError};
pub use outcome::{AuthFailure, AuthorizationOutcome};
