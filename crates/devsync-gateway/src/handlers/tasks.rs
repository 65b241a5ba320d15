// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kanban board routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use devsync_core::ops::board::{self, TaskDraft};
use devsync_core::{DevsyncError, Task, TaskPatch, TaskStatus};
use serde::{Deserialize, Deserializer};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::access_for;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Partial update. An absent field is left alone; `null` clears the
/// nullable ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub assignee_id: Option<Option<String>>,
}

/// Distinguishes `"field": null` from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateTaskRequest> for TaskPatch {
    fn from(req: UpdateTaskRequest) -> Self {
        TaskPatch {
            title: req.title,
            description: req.description,
            status: req.status,
            order: req.order,
            assignee_id: req.assignee_id,
        }
    }
}

async fn load_task(state: &GatewayState, id: &str) -> Result<Task, ApiError> {
    state
        .store
        .get_task(id)
        .await?
        .ok_or_else(|| ApiError(DevsyncError::not_found("task")))
}

/// GET /tasks/by-project/{project_id}
pub async fn list(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let access = access_for(&state, &user, &project_id).await?;
    Ok(Json(board::list_tasks(&*state.store, &access).await?))
}

/// POST /tasks
pub async fn create(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateTaskRequest>, ApiError>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let access = access_for(&state, &user, &body.project_id).await?;
    let draft = TaskDraft {
        title: body.title,
        description: body.description,
        status: body.status,
        order: body.order,
    };
    let task = board::create_task(&*state.store, &access, draft).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id}
pub async fn update(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateTaskRequest>, ApiError>,
) -> Result<Json<Task>, ApiError> {
    let task = load_task(&state, &id).await?;
    let access = access_for(&state, &user, &task.project_id).await?;
    let updated = board::update_task(&*state.store, &access, &task, body.into()).await?;
    Ok(Json(updated))
}

/// DELETE /tasks/{id}
pub async fn delete(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let task = load_task(&state, &id).await?;
    let access = access_for(&state, &user, &task.project_id).await?;
    board::delete_task(&*state.store, &access, &task).await?;
    Ok(StatusCode::NO_CONTENT)
}
