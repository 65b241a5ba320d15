// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side error type.

use devsync_core::DevsyncError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered and rejected the request.
    #[error(transparent)]
    Api(#[from] DevsyncError),

    /// The server could not be reached or did not answer in time. The UI
    /// shows this as "reconnecting" rather than as a hard failure.
    #[error("server unavailable: {0}")]
    Unavailable(String),

    /// Unexpected frame or payload on the realtime connection.
    #[error("realtime protocol error: {0}")]
    Protocol(String),

    /// The stored session is past its expiry.
    #[error("session expired")]
    SessionExpired,
}

impl ClientError {
    /// Worth retrying once the server is reachable again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Unavailable(_) | ClientError::Api(DevsyncError::Timeout { .. })
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Unavailable(e.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Protocol(e.to_string())
    }
}
