// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers, one module per resource.

pub mod accounts;
pub mod health;
pub mod members;
pub mod messages;
pub mod projects;
pub mod tasks;

use devsync_core::{resolve_access, Access};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::server::GatewayState;

/// Load the project and the caller's current role on it.
pub(crate) async fn access_for(
    state: &GatewayState,
    user: &AuthUser,
    project_id: &str,
) -> Result<Access, ApiError> {
    Ok(resolve_access(&*state.store, &user.id, project_id).await?)
}
