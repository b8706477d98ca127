//! JSON response envelope.
//!
//! Every non-list, non-redirect response uses the same body shape:
//! `{"status": "OK"}` or `{"status": "Error", "error": ["..."]}`.
//! Errors other than authorization failures are reported in the body with
//! HTTP 200 (status-in-body convention).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error: Vec<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            error: Vec::new(),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::errors(vec![msg.into()])
    }

    pub fn errors(messages: Vec<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            error: messages,
        }
    }
}
