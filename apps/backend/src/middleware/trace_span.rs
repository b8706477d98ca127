//! Per-request tracing span.
//!
//! Every event logged while a request is handled (authorization, the SSO
//! call, storage errors) inherits `trace_id`, `method` and `path` from the
//! `request` span. The response status is recorded on the span when the
//! handler finishes. Needs the `RequestId` set by `RequestTrace`, so it is
//! wrapped just inside it.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::field::Empty;
use tracing::{info_span, Instrument, Span};

use super::request_trace::RequestId;
use crate::trace_ctx;

pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

fn request_span(req: &ServiceRequest) -> Span {
    let extensions = req.extensions();
    let trace_id = extensions
        .get::<RequestId>()
        .map(RequestId::as_str)
        .unwrap_or(trace_ctx::UNKNOWN);

    info_span!(
        "request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.path(),
        status = Empty,
    )
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
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
        let span = request_span(&req);
        let fut = self.service.call(req);

        let status_span = span.clone();
        Box::pin(
            async move {
                let result = fut.await;
                if let Ok(res) = &result {
                    status_span.record("status", res.status().as_u16());
                }
                result
            }
            .instrument(span),
        )
    }
}
