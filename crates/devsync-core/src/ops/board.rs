// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kanban board operations.
//!
//! Creation and deletion need an admin-tier role; any writer may move or edit
//! a task. Concurrent edits are last-write-wins.

use tracing::info;

use crate::error::DevsyncError;
use crate::policy::Capability;
use crate::role::{role_on, Access};
use crate::traits::{MembershipStore, TaskStore};
use crate::types::{NewTask, Task, TaskPatch, TaskStatus};

/// Unvalidated task creation input.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub order: Option<i64>,
}

/// Trim and require a title.
fn clean_title(title: &str) -> Result<String, DevsyncError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DevsyncError::validation("title", "is required"));
    }
    Ok(title.to_string())
}

/// Trim a description; blank becomes `None`.
fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Tasks of the project in board order. Requires read access.
pub async fn list_tasks<S>(store: &S, access: &Access) -> Result<Vec<Task>, DevsyncError>
where
    S: TaskStore + ?Sized,
{
    access.require(Capability::Read)?;
    store.list_tasks(&access.project.id).await
}

/// Create a task in the project. Requires owner or admin role.
pub async fn create_task<S>(store: &S, access: &Access, draft: TaskDraft) -> Result<Task, DevsyncError>
where
    S: TaskStore + ?Sized,
{
    access.require(Capability::Manage)?;
    let new_task = NewTask {
        project_id: access.project.id.clone(),
        title: clean_title(&draft.title)?,
        description: clean_description(draft.description.as_deref()),
        status: draft.status.unwrap_or_default(),
        order: draft.order.unwrap_or(0),
    };
    let task = store.create_task(&new_task).await?;
    info!(project_id = %task.project_id, task_id = %task.id, "task created");
    Ok(task)
}

/// Apply a partial update. Requires write access.
///
/// Re-setting the current status is a successful no-op. A non-null assignee
/// must be a participant (owner or member) of the task's project.
pub async fn update_task<S>(
    store: &S,
    access: &Access,
    task: &Task,
    mut patch: TaskPatch,
) -> Result<Task, DevsyncError>
where
    S: TaskStore + MembershipStore + ?Sized,
{
    access.require(Capability::Write)?;
    debug_assert_eq!(task.project_id, access.project.id);

    if let Some(title) = patch.title.as_deref() {
        patch.title = Some(clean_title(title)?);
    }
    if let Some(description) = patch.description.take() {
        patch.description = Some(clean_description(description.as_deref()));
    }
    if let Some(Some(assignee)) = patch.assignee_id.as_ref() {
        let role = role_on(store, &access.project, assignee).await?;
        if !Capability::Read.allows(role) {
            return Err(DevsyncError::validation(
                "assigneeId",
                "must be a participant of the project",
            ));
        }
    }
    if patch.is_empty() {
        return Ok(task.clone());
    }

    let updated = store
        .update_task(&task.id, &patch)
        .await?
        .ok_or_else(|| DevsyncError::not_found("task"))?;
    info!(
        project_id = %updated.project_id,
        task_id = %updated.id,
        status = %updated.status,
        "task updated"
    );
    Ok(updated)
}

/// Delete a task. Requires owner or admin role.
pub async fn delete_task<S>(store: &S, access: &Access, task: &Task) -> Result<(), DevsyncError>
where
    S: TaskStore + ?Sized,
{
    access.require(Capability::Manage)?;
    if !store.delete_task(&task.id).await? {
        return Err(DevsyncError::not_found("task"));
    }
    info!(project_id = %task.project_id, task_id = %task.id, "task deleted");
    Ok(())
}
