// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use devsync_core::ops::projects::{self, ProjectDetail, ProjectSummary};
use devsync_core::Project;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::access_for;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// GET /projects
pub async fn list(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    Ok(Json(projects::list_projects(&*state.store, &user.id).await?))
}

/// POST /projects
pub async fn create(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateProjectRequest>, ApiError>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = projects::create_project(
        &*state.store,
        &user.id,
        &body.name,
        body.description.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects/{id}
pub async fn detail(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetail>, ApiError> {
    let access = access_for(&state, &user, &id).await?;
    Ok(Json(projects::project_detail(&*state.store, &access).await?))
}

/// DELETE /projects/{id}
pub async fn delete(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let access = access_for(&state, &user, &id).await?;
    projects::delete_project(&*state.store, &access).await?;
    Ok(StatusCode::NO_CONTENT)
}
