//! Access log.
//!
//! One `request_completed` event per request. Sits outside `Authorization`,
//! so the outcome it stored is read back from the finished request and
//! logged as the caller kind. Query strings may carry aliases and URLs and
//! are passed through the PII redactor.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, StatusCode};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::RequestId;
use crate::auth::{AuthFailure, AuthorizationOutcome};
use crate::logging::pii::redact;
use crate::trace_ctx;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// Fields captured before the request is handed downstream
struct AccessLine {
    method: String,
    path: String,
    query: String,
    remote_addr: String,
    user_agent: String,
    trace_id: String,
    started: Instant,
}

impl AccessLine {
    fn from_request(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query: redact(req.query_string()),
            remote_addr: req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("-")
                .to_string(),
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string(),
            trace_id: req
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0.clone())
                .unwrap_or_else(|| trace_ctx::UNKNOWN.to_string()),
            started: Instant::now(),
        }
    }

    fn emit(&self, status: StatusCode, caller: &str) {
        let duration_us = self.started.elapsed().as_micros() as u64;
        let code = status.as_u16();

        macro_rules! access {
            ($level:ident) => {
                $level!(
                    http.method = %self.method,
                    url.path = %self.path,
                    url.query = %self.query,
                    http.status_code = code,
                    duration_us,
                    caller,
                    remote_addr = %self.remote_addr,
                    user_agent = %self.user_agent,
                    trace_id = %self.trace_id,
                    "request_completed"
                )
            };
        }

        if status.is_server_error() {
            access!(error);
        } else if status.is_client_error() {
            access!(warn);
        } else {
            access!(info);
        }
    }
}

/// Short label for the caller, safe to log
pub fn caller_label(outcome: Option<&AuthorizationOutcome>) -> &'static str {
    match outcome {
        None => "none",
        Some(AuthorizationOutcome::Anonymous) => "anonymous",
        Some(AuthorizationOutcome::Authenticated { is_admin: true }) => "admin",
        Some(AuthorizationOutcome::Authenticated { is_admin: false }) => "user",
        Some(AuthorizationOutcome::Failed(AuthFailure::InvalidToken)) => "invalid_token",
        Some(AuthorizationOutcome::Failed(AuthFailure::AuthorizationCheckFailed)) => {
            "check_failed"
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = AccessLine::from_request(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            match &result {
                Ok(res) => {
                    let caller =
                        caller_label(res.request().extensions().get::<AuthorizationOutcome>());
                    line.emit(res.status(), caller);
                }
                Err(err) => line.emit(err.as_response_error().status_code(), "none"),
            }

            result
        })
    }
}
