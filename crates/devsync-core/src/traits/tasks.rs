// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task persistence.

use async_trait::async_trait;

use crate::error::DevsyncError;
use crate::types::{NewTask, Task, TaskPatch};

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks of the project in board order: column, then `order`, then
    /// creation time, then id.
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, DevsyncError>;

    async fn create_task(&self, task: &NewTask) -> Result<Task, DevsyncError>;

    async fn get_task(&self, id: &str) -> Result<Option<Task>, DevsyncError>;

    /// Applies the patch atomically. `None` when the task does not exist.
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, DevsyncError>;

    /// Returns false when no such task existed.
    async fn delete_task(&self, id: &str) -> Result<bool, DevsyncError>;
}
