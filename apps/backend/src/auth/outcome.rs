//! Per-request authorization outcome.
//!
//! The authorization middleware evaluates every request exactly once and
//! stores one `AuthorizationOutcome` in the request extensions. Handlers
//! receive it as a typed extractor argument and decide locally whether the
//! endpoint needs admin rights.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::AppError;

/// Message returned when the caller is not an admin.
pub const NOT_PERMITTED: &str = "operation does not permitted";

/// Why authorization could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// A bearer token was presented but did not verify
    InvalidToken,
    /// The remote admin check errored
    AuthorizationCheckFailed,
}

impl Display for AuthFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AuthFailure::InvalidToken => write!(f, "invalid token"),
            AuthFailure::AuthorizationCheckFailed => {
                write!(f, "failed to check if user is admin")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationOutcome {
    /// No bearer token was presented
    #[default]
    Anonymous,
    Failed(AuthFailure),
    Authenticated { is_admin: bool },
}

impl AuthorizationOutcome {
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthorizationOutcome::Authenticated { is_admin: true })
    }

    /// Policy shared by all mutating endpoints.
    ///
    /// Evaluation failures win over the admin check so the caller learns
    /// why their token was not accepted.
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self {
            AuthorizationOutcome::Failed(reason) => Err(AppError::forbidden(reason.to_string())),
            outcome if outcome.is_admin() => Ok(()),
            _ => Err(AppError::forbidden(NOT_PERMITTED.to_string())),
        }
    }
}
