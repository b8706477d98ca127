//! Authorization middleware.
//!
//! Runs on every request and never rejects one. It resolves the caller to
//! exactly one [`AuthorizationOutcome`], stores it in the request
//! extensions and forwards. Handlers decide what the outcome means for
//! their endpoint.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, error, warn};

use crate::auth::{verify_access_token, AuthFailure, AuthorizationOutcome};
use crate::logging::pii::Redacted;
use crate::sso::PermissionProvider;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

const BEARER_PREFIX: &str = "Bearer ";

pub struct Authorization;

impl<S, B> Transform<S, ServiceRequest> for Authorization
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthorizationMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthorizationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = extract_bearer_token(req.headers().get(header::AUTHORIZATION));
        let app_state = req.app_data::<web::Data<AppState>>().cloned();
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let outcome = match app_state {
                Some(state) => {
                    evaluate(
                        token.as_deref(),
                        &state.security,
                        state.permissions.as_ref(),
                    )
                    .await
                }
                None => {
                    error!("AppState not available; authorization fails closed");
                    AuthorizationOutcome::Failed(AuthFailure::AuthorizationCheckFailed)
                }
            };

            req.extensions_mut().insert(outcome);
            service.call(req).await
        })
    }
}

/// Resolve a request's authorization outcome.
///
/// Only a verified token leads to a remote call.
pub async fn evaluate(
    token: Option<&str>,
    security: &SecurityConfig,
    permissions: &dyn PermissionProvider,
) -> AuthorizationOutcome {
    let Some(token) = token else {
        return AuthorizationOutcome::Anonymous;
    };

    let claims = match verify_access_token(token, security) {
        Ok(claims) => claims,
        Err(reason) => {
            warn!(reason = %reason, token = %Redacted(token), "rejected bearer token");
            return AuthorizationOutcome::Failed(AuthFailure::InvalidToken);
        }
    };

    let user_id = claims.uid.hyphenated().to_string();
    match permissions.is_admin(&user_id).await {
        Ok(is_admin) => {
            debug!(user_id = %user_id, is_admin, "authorization resolved");
            AuthorizationOutcome::Authenticated { is_admin }
        }
        Err(e) => {
            error!(user_id = %user_id, error = %e, "failed to check if user is admin");
            AuthorizationOutcome::Failed(AuthFailure::AuthorizationCheckFailed)
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// Anything else (missing header, non-UTF-8 bytes, another scheme, empty
/// token, a repeated `Bearer `) yields `None`.
pub fn extract_bearer_token(header_value: Option<&HeaderValue>) -> Option<String> {
    let value = header_value?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?;
    if token.is_empty() || token.contains(BEARER_PREFIX) {
        return None;
    }
    Some(token.to_string())
}
