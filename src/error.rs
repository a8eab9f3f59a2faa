// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for the flows and the HTTP layer.
//!
//! The flows use a small closed set of error kinds instead of flattened
//! strings, and the HTTP layer maps each kind to a status code:
//!
//! - [`FlowError::PreconditionNotMet`] → 422 (required wallet identity missing)
//! - [`FlowError::ExternalCall`] → 502 (CA or gateway failure, no retry)
//!
//! Malformed request bodies are rejected by the axum extractors before a
//! handler runs, which covers the invalid-input kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Typed failure of an enrollment or transaction flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// A required wallet identity is missing. The flow aborts before issuing
    /// any external call.
    #[error("An identity for \"{label}\" does not exist in the wallet; {hint}")]
    PreconditionNotMet {
        label: &'static str,
        hint: &'static str,
    },

    /// A CA or gateway call failed. The caller must reissue the request.
    #[error("Failed to {action}: {message}")]
    ExternalCall { action: String, message: String },
}

impl FlowError {
    /// Wrap an external collaborator's error with the action that failed.
    pub fn external(action: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::ExternalCall {
            action: action.into(),
            message: error.to_string(),
        }
    }
}

/// An HTTP-facing error with status code and JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl From<FlowError> for ApiError {
    fn from(error: FlowError) -> Self {
        match &error {
            FlowError::PreconditionNotMet { .. } => ApiError::unprocessable(error.to_string()),
            FlowError::ExternalCall { .. } => ApiError::bad_gateway(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
