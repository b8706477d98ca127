//! Request bodies, body decoding and field validation.

use actix_web::web::{self, Bytes, BytesMut};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::config::app::MAX_ALIAS_LENGTH;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub const EMPTY_REQUEST: &str = "empty request";
pub const DECODE_FAILED: &str = "failed to decode request";
pub const INVALID_REQUEST: &str = "invalid request";

/// Largest request body a handler will buffer
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Body of `POST /save`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

/// A save request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSave {
    pub url: String,
    /// `None` when the caller left the alias to the server
    pub alias: Option<String>,
}

impl SaveRequest {
    /// Checks every field and reports all problems at once, `url` first.
    pub fn validate(self) -> Result<ValidSave, AppError> {
        let mut messages = Vec::new();

        let url = self.url.unwrap_or_default();
        if url.is_empty() {
            messages.push("field Url is a required field".to_string());
        } else if url.chars().any(char::is_control) || url::Url::parse(&url).is_err() {
            messages.push("field Url is not a valid URL".to_string());
        }

        let alias = self.alias.filter(|a| !a.is_empty());
        if let Some(alias) = &alias {
            if !alias.chars().all(|c| c.is_ascii_alphanumeric()) {
                messages.push("field Alias is not a valid alphanumeric string".to_string());
            } else if alias.len() > MAX_ALIAS_LENGTH {
                messages.push("field Alias is not valid".to_string());
            }
        }

        if messages.is_empty() {
            Ok(ValidSave { url, alias })
        } else {
            Err(AppError::validation(messages))
        }
    }
}

/// Buffer a request body of at most `limit` bytes. Call it after the
/// authorization check, never from an extractor.
pub async fn read_body(mut payload: web::Payload, limit: usize) -> Result<Bytes, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            debug!(trace_id = %trace_ctx::trace_id(), error = %e, "failed to read request body");
            AppError::bad_request(DECODE_FAILED)
        })?;
        if body.len() + chunk.len() > limit {
            debug!(
                trace_id = %trace_ctx::trace_id(),
                limit,
                "request body exceeds limit"
            );
            return Err(AppError::bad_request(DECODE_FAILED));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

/// Decode a complete request body.
pub fn decode<T: DeserializeOwned>(body: &[u8], content_type: &str) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!(trace_id = %trace_ctx::trace_id(), "request body is empty");
        return Err(AppError::bad_request(EMPTY_REQUEST));
    }

    serde_json::from_slice::<T>(body).map_err(|e| {
        debug!(
            trace_id = %trace_ctx::trace_id(),
            error = %Redacted(&e.to_string()),
            detail = %classify_json_error(&e),
            content_type = %content_type,
            body_size = body.len(),
            "failed to decode request body"
        );
        AppError::bad_request(DECODE_FAILED)
    })
}

/// Short description of a serde_json failure, for logs
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "unexpected end of input".to_string(),
        serde_json::error::Category::Data => "wrong types for one or more fields".to_string(),
        serde_json::error::Category::Io => "I/O error while reading body".to_string(),
    }
}
