// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration, login and identity.

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::WithRejection;
use devsync_core::ops::accounts::{normalize_email, validate_registration};
use devsync_core::{DevsyncError, User};
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password_blocking, verify_password_blocking, AuthUser};
use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the identity it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: User,
}

fn respond(state: &GatewayState, user: User) -> Result<AuthResponse, ApiError> {
    let issued = state.tokens.issue(&user)?;
    Ok(AuthResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user,
    })
}

/// POST /auth/register
pub async fn register(
    State(state): State<GatewayState>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let reg = validate_registration(
        &body.email,
        &body.name,
        &body.password,
        state.settings.min_password_len,
    )?;
    let hash = hash_password_blocking(body.password).await?;
    let user = state.store.create_user(&reg.email, &reg.name, &hash).await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(respond(&state, user)?)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<GatewayState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<AuthResponse>, ApiError> {
    let invalid = || ApiError(DevsyncError::Unauthorized("invalid credentials".into()));
    let Some(stored) = state
        .store
        .find_user_by_email(&normalize_email(&body.email))
        .await?
    else {
        return Err(invalid());
    };
    if !verify_password_blocking(body.password, stored.password_hash).await {
        return Err(invalid());
    }
    tracing::debug!(user_id = %stored.user.id, "user logged in");
    Ok(Json(respond(&state, stored.user)?))
}

/// GET /auth/me
pub async fn me(
    State(state): State<GatewayState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<User>, ApiError> {
    state
        .store
        .get_user(&caller.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError(DevsyncError::Unauthorized("unknown user".into())))
}
