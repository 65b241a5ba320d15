// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of domain errors onto HTTP responses.
//!
//! Every failure leaves the gateway as `{"error": "...", "field": "..."}` with
//! `field` present only for validation failures. Infrastructure errors are
//! logged and replaced by a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use devsync_core::DevsyncError;
use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// A [`DevsyncError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub DevsyncError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DevsyncError::Validation { .. } => StatusCode::BAD_REQUEST,
            DevsyncError::NotFound(_) => StatusCode::NOT_FOUND,
            DevsyncError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DevsyncError::Forbidden(_) => StatusCode::FORBIDDEN,
            DevsyncError::Conflict(_) => StatusCode::CONFLICT,
            DevsyncError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            DevsyncError::Storage { .. } | DevsyncError::Config(_) | DevsyncError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, field) = match &self.0 {
            DevsyncError::Validation { field, message } => {
                (format!("{field} {message}"), Some(field.clone()))
            }
            DevsyncError::NotFound(_) => (self.0.to_string(), None),
            DevsyncError::Unauthorized(reason)
            | DevsyncError::Forbidden(reason)
            | DevsyncError::Conflict(reason) => (reason.clone(), None),
            DevsyncError::Timeout { .. } => ("request timed out".to_string(), None),
            DevsyncError::Storage { .. } | DevsyncError::Config(_) | DevsyncError::Internal(_) => {
                ("internal server error".to_string(), None)
            }
        };
        ErrorBody { error, field }
    }
}

impl From<DevsyncError> for ApiError {
    fn from(err: DevsyncError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DevsyncError::validation("body", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
