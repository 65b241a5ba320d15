// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat message persistence.

use async_trait::async_trait;

use crate::error::DevsyncError;
use crate::types::Message;

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Messages of the project in chronological order.
    async fn list_messages(&self, project_id: &str) -> Result<Vec<Message>, DevsyncError>;

    /// Persists a message and returns it with the sender summary embedded.
    /// `content` is stored as given.
    async fn create_message(
        &self,
        project_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, DevsyncError>;
}
