// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project persistence.

use async_trait::async_trait;

use crate::error::DevsyncError;
use crate::types::Project;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Creates a project owned by `owner_id`. No membership row is written.
    async fn create_project(
        &self,
        owner_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, DevsyncError>;

    async fn get_project(&self, id: &str) -> Result<Option<Project>, DevsyncError>;

    /// Projects the user owns or is a member of, newest first.
    async fn list_projects_for_user(&self, user_id: &str) -> Result<Vec<Project>, DevsyncError>;

    /// Deletes the project together with its tasks, messages and memberships.
    /// Returns false when no such project existed.
    async fn delete_project(&self, id: &str) -> Result<bool, DevsyncError>;
}
