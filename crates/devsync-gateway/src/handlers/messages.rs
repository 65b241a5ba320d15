// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat history and message creation.
//!
//! Creating a message only persists it. Fan-out to the rest of the room is
//! the sender's job over its WebSocket connection, once it holds the stored
//! copy returned here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use devsync_core::ops::chat;
use devsync_core::Message;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::access_for;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub project_id: String,
    pub content: String,
}

/// GET /messages/by-project/{project_id}
pub async fn list(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let access = access_for(&state, &user, &project_id).await?;
    Ok(Json(chat::history(&*state.store, &access).await?))
}

/// POST /messages
pub async fn create(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateMessageRequest>, ApiError>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let access = access_for(&state, &user, &body.project_id).await?;
    let message = chat::post_message(&*state.store, &access, &user.id, &body.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
