// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit credential object handed to every API call.

use chrono::{DateTime, Utc};
use devsync_core::User;
use serde::Deserialize;

use crate::error::ClientError;

/// Body returned by `/auth/register` and `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: User,
}

/// An authenticated identity with its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl TryFrom<AuthResponse> for Session {
    type Error = ClientError;

    fn try_from(resp: AuthResponse) -> Result<Self, Self::Error> {
        let expires_at = DateTime::parse_from_rfc3339(&resp.expires_at)
            .map_err(|e| ClientError::Protocol(format!("bad expiresAt: {e}")))?
            .with_timezone(&Utc);
        Ok(Session {
            token: resp.token,
            user: resp.user,
            expires_at,
        })
    }
}

/// Where the client stands with respect to authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
    /// The token ran out; the user is remembered so the login form can be
    /// prefilled.
    Expired { user: User },
}

impl SessionState {
    pub fn login(&mut self, session: Session) {
        *self = SessionState::Authenticated(session);
    }

    pub fn logout(&mut self) {
        *self = SessionState::Anonymous;
    }

    /// Move an authenticated state past its expiry to `Expired`.
    pub fn check_expiry(&mut self, now: DateTime<Utc>) -> &Self {
        if let SessionState::Authenticated(session) = self {
            if session.is_expired(now) {
                tracing::debug!(user_id = %session.user.id, "session expired");
                *self = SessionState::Expired {
                    user: session.user.clone(),
                };
            }
        }
        self
    }

    /// The live session, if any.
    pub fn session(&self) -> Result<&Session, ClientError> {
        match self {
            SessionState::Authenticated(session) => Ok(session),
            SessionState::Expired { .. } => Err(ClientError::SessionExpired),
            SessionState::Anonymous => Err(ClientError::Api(
                devsync_core::DevsyncError::Unauthorized("not logged in".into()),
            )),
        }
    }
}
