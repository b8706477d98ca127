use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;
use tracing::error;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::http::response::ApiResponse;
use crate::trace_ctx;

/// Generic message for failures whose details must stay server-side.
pub const INTERNAL_ERROR: &str = "internal error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Forbidden: {detail}")]
    Forbidden { detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Validation failed: {}", messages.join("; "))]
    Validation { messages: Vec<String> },
    #[error("Conflict: {detail}")]
    Conflict { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    /// `public` is what the client sees; `detail` is only logged.
    #[error("Internal error: {detail}")]
    Internal { public: &'static str, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Only authorization failures change the status line; every other
    /// failure is reported in the body of a 200 response.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest { .. }
            | AppError::Validation { .. }
            | AppError::Conflict { .. }
            | AppError::NotFound { .. }
            | AppError::Internal { .. } => StatusCode::OK,
        }
    }

    /// Messages rendered into the response envelope
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Forbidden { detail }
            | AppError::BadRequest { detail }
            | AppError::Conflict { detail }
            | AppError::NotFound { detail } => vec![detail.clone()],
            AppError::Validation { messages } => messages.clone(),
            AppError::Internal { public, .. } => vec![public.to_string()],
            AppError::Config { .. } => vec![INTERNAL_ERROR.to_string()],
        }
    }

    pub fn forbidden(detail: String) -> Self {
        Self::Forbidden { detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict {
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            public: INTERNAL_ERROR,
            detail: detail.into(),
        }
    }

    /// Internal failure with a caller-facing message other than the generic one
    pub fn internal_with(public: &'static str, detail: impl Into<String>) -> Self {
        Self::Internal {
            public,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::bad_request(detail),
            DomainError::Conflict(ConflictKind::AliasExists, _) => {
                AppError::conflict("alias already exists")
            }
            DomainError::Conflict(_, detail) => AppError::conflict(detail),
            DomainError::NotFound(NotFoundKind::Alias, _) => AppError::not_found("not found"),
            DomainError::NotFound(_, detail) => AppError::not_found(detail),
            DomainError::Infra(kind, detail) => {
                AppError::internal(format!("infra {kind:?}: {detail}"))
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::internal(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = trace_ctx::trace_id();

        if let AppError::Internal { detail, .. } | AppError::Config { detail } = self {
            error!(trace_id = %trace_id, detail = %detail, "request failed with internal error");
        }

        HttpResponse::build(self.status())
            .insert_header(("x-trace-id", trace_id))
            .json(ApiResponse::errors(self.messages()))
    }
}
