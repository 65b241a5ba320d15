// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role resolution for a (user, project) pair.
//!
//! Ownership is derived from `Project.owner_id` and always wins over any
//! stored membership. The variant structure makes that precedence explicit:
//! a stored role can only ever be `ADMIN`, `MEMBER` or `VIEWER`.

use serde::{Serialize, Serializer};

use crate::error::DevsyncError;
use crate::traits::{MembershipStore, ProjectStore};
use crate::types::{MemberRole, Project};

/// Effective role of a user on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The user created the project.
    Owner,
    /// The user holds a membership row with this role.
    Stored(MemberRole),
    /// The project exists but the user has no relation to it.
    NoAccess,
}

impl Role {
    /// Wire name of the role, `None` for [`Role::NoAccess`].
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Role::Owner => Some("OWNER"),
            Role::Stored(MemberRole::Admin) => Some("ADMIN"),
            Role::Stored(MemberRole::Member) => Some("MEMBER"),
            Role::Stored(MemberRole::Viewer) => Some("VIEWER"),
            Role::NoAccess => None,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_none(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str().unwrap_or("NONE"))
    }
}

/// Resolve the role of `user_id` on `project_id`.
///
/// Returns `Ok(None)` when the project does not exist, which callers must keep
/// distinct from [`Role::NoAccess`]. The owner check happens before, and
/// instead of, the membership lookup. Nothing is cached: call this fresh for
/// every authorization decision.
pub async fn resolve_role<S>(
    store: &S,
    user_id: &str,
    project_id: &str,
) -> Result<Option<Role>, DevsyncError>
where
    S: ProjectStore + MembershipStore + ?Sized,
{
    let Some(project) = store.get_project(project_id).await? else {
        return Ok(None);
    };
    Ok(Some(role_on(store, &project, user_id).await?))
}

/// Role of `user_id` on an already loaded project.
pub async fn role_on<S>(store: &S, project: &Project, user_id: &str) -> Result<Role, DevsyncError>
where
    S: MembershipStore + ?Sized,
{
    if project.owner_id == user_id {
        return Ok(Role::Owner);
    }
    Ok(store
        .member_role(&project.id, user_id)
        .await?
        .map(Role::Stored)
        .unwrap_or(Role::NoAccess))
}

/// A loaded project together with the caller's role on it.
#[derive(Debug, Clone)]
pub struct Access {
    pub project: Project,
    pub role: Role,
}

/// Load the project and the caller's role, translating a missing project
/// into `NotFound`. A caller without any role gets `Forbidden` rather than
/// `NotFound`, so membership cannot be probed through status codes for
/// projects that exist.
pub async fn resolve_access<S>(
    store: &S,
    user_id: &str,
    project_id: &str,
) -> Result<Access, DevsyncError>
where
    S: ProjectStore + MembershipStore + ?Sized,
{
    let project = store
        .get_project(project_id)
        .await?
        .ok_or_else(|| DevsyncError::not_found("project"))?;
    let role = role_on(store, &project, user_id).await?;
    Ok(Access { project, role })
}
