// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Membership management. The owner never appears as a member and cannot be
//! targeted by any of these routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use devsync_core::ops::membership::{self, MemberListing};
use devsync_core::{MemberRole, Membership};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::access_for;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub email: String,
    #[serde(default)]
    pub role: Option<MemberRole>,
}

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: MemberRole,
}

/// GET /members/{project_id}
pub async fn list(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<String>,
) -> Result<Json<MemberListing>, ApiError> {
    let access = access_for(&state, &user, &project_id).await?;
    Ok(Json(membership::list_members(&*state.store, &access).await?))
}

/// POST /members/{project_id}
///
/// Upsert: inviting an existing member updates its role.
pub async fn invite(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<InviteRequest>, ApiError>,
) -> Result<(StatusCode, Json<Membership>), ApiError> {
    let access = access_for(&state, &user, &project_id).await?;
    let member =
        membership::invite_member(&*state.store, &access, &body.email, body.role).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /members/{project_id}/{user_id}
pub async fn change_role(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path((project_id, user_id)): Path<(String, String)>,
    WithRejection(Json(body), _): WithRejection<Json<RoleRequest>, ApiError>,
) -> Result<Json<Membership>, ApiError> {
    let access = access_for(&state, &user, &project_id).await?;
    let member = membership::change_role(&*state.store, &access, &user_id, body.role).await?;
    Ok(Json(member))
}

/// DELETE /members/{project_id}/{user_id}
pub async fn remove(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path((project_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let access = access_for(&state, &user, &project_id).await?;
    membership::remove_member(&*state.store, &access, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
