// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project lifecycle and the aggregated project view.

use serde::Serialize;
use tracing::info;

use crate::error::DevsyncError;
use crate::ops::membership::{list_members, MemberListing};
use crate::policy::Capability;
use crate::role::{role_on, Access, Role};
use crate::traits::{MembershipStore, MessageStore, ProjectStore, TaskStore, UserStore};
use crate::types::{Message, Project, Task};

/// A project as listed on the dashboard, with the caller's role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub role: Role,
}

/// Everything the project page needs in one response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub role: Role,
    #[serde(flatten)]
    pub listing: MemberListing,
    pub tasks: Vec<Task>,
    pub messages: Vec<Message>,
}

/// Create a project owned by `owner_id`.
pub async fn create_project<S>(
    store: &S,
    owner_id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<Project, DevsyncError>
where
    S: ProjectStore + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(DevsyncError::validation("name", "is required"));
    }
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    let project = store.create_project(owner_id, name, description).await?;
    info!(project_id = %project.id, %owner_id, "project created");
    Ok(project)
}

/// Projects the user owns or belongs to.
pub async fn list_projects<S>(store: &S, user_id: &str) -> Result<Vec<ProjectSummary>, DevsyncError>
where
    S: ProjectStore + MembershipStore + ?Sized,
{
    let projects = store.list_projects_for_user(user_id).await?;
    let mut summaries = Vec::with_capacity(projects.len());
    for project in projects {
        let role = role_on(store, &project, user_id).await?;
        summaries.push(ProjectSummary { project, role });
    }
    Ok(summaries)
}

/// Full project view. Requires read access.
pub async fn project_detail<S>(store: &S, access: &Access) -> Result<ProjectDetail, DevsyncError>
where
    S: UserStore + MembershipStore + TaskStore + MessageStore + ?Sized,
{
    access.require(Capability::Read)?;
    let listing = list_members(store, access).await?;
    let tasks = store.list_tasks(&access.project.id).await?;
    let messages = store.list_messages(&access.project.id).await?;
    Ok(ProjectDetail {
        project: access.project.clone(),
        role: access.role,
        listing,
        tasks,
        messages,
    })
}

/// Delete the project and everything it owns. Only the owner may do this.
pub async fn delete_project<S>(store: &S, access: &Access) -> Result<(), DevsyncError>
where
    S: ProjectStore + ?Sized,
{
    access.require(Capability::Own)?;
    if !store.delete_project(&access.project.id).await? {
        return Err(DevsyncError::not_found("project"));
    }
    info!(project_id = %access.project.id, "project deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::resolve_access;
    use crate::testing::MemoryStore;
    use crate::types::MemberRole;

    #[tokio::test]
    async fn creator_becomes_owner_without_membership_row() {
        let store = MemoryStore::new();
        let alice = store.add_user("alice@example.com", "Alice");
        let project = create_project(&store, &alice.id, " Sprint ", Some("  "))
            .await
            .unwrap();
        assert_eq!(project.name, "Sprint");
        assert!(project.description.is_none());
        assert!(store.list_members(&project.id).await.unwrap().is_empty());

        let listed = list_projects(&store, &alice.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].role, Role::Owner);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let store = MemoryStore::new();
        let alice = store.add_user("alice@example.com", "Alice");
        let err = create_project(&store, &alice.id, "  ", None).await.unwrap_err();
        assert!(matches!(err, DevsyncError::Validation { .. }));
    }

    #[tokio::test]
    async fn only_owner_deletes() {
        let store = MemoryStore::new();
        let alice = store.add_user("alice@example.com", "Alice");
        let bob = store.add_user("bob@example.com", "Bob");
        let project = store.add_project(&alice.id, "Sprint");
        store.put_member(&project.id, &bob.id, MemberRole::Admin);

        let admin = resolve_access(&store, &bob.id, &project.id).await.unwrap();
        assert!(matches!(
            delete_project(&store, &admin).await.unwrap_err(),
            DevsyncError::Forbidden(_)
        ));

        let owner = resolve_access(&store, &alice.id, &project.id).await.unwrap();
        delete_project(&store, &owner).await.unwrap();
        assert!(store.get_project(&project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn detail_serializes_flat() {
        let store = MemoryStore::new();
        let alice = store.add_user("alice@example.com", "Alice");
        let project = store.add_project(&alice.id, "Sprint");
        let access = resolve_access(&store, &alice.id, &project.id).await.unwrap();

        let detail = project_detail(&store, &access).await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "Sprint");
        assert_eq!(json["role"], "OWNER");
        assert_eq!(json["owner"]["id"], alice.id.as_str());
        assert!(json["members"].as_array().unwrap().is_empty());
        assert!(json["tasks"].as_array().unwrap().is_empty());
    }
}
