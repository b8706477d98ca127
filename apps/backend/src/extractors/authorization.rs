use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use tracing::warn;

use crate::auth::AuthorizationOutcome;
use crate::error::AppError;

/// Reads the outcome stored by the `Authorization` middleware.
///
/// A request that never passed through the middleware has no outcome and
/// is treated as anonymous.
impl FromRequest for AuthorizationOutcome {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let outcome = req.extensions().get::<AuthorizationOutcome>().copied();
        ready(Ok(outcome.unwrap_or_else(|| {
            warn!(path = %req.path(), "no authorization outcome on request; treating as anonymous");
            AuthorizationOutcome::Anonymous
        })))
    }
}
