// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project chat: history replay and message posting.

use tracing::debug;

use crate::error::DevsyncError;
use crate::policy::Capability;
use crate::role::Access;
use crate::traits::MessageStore;
use crate::types::Message;

/// Chronological history of the project chat. Requires read access.
pub async fn history<S>(store: &S, access: &Access) -> Result<Vec<Message>, DevsyncError>
where
    S: MessageStore + ?Sized,
{
    access.require(Capability::Read)?;
    store.list_messages(&access.project.id).await
}

/// Persist a message from `sender_id`. Requires write access.
///
/// Content is trimmed; empty content is rejected and nothing is stored.
pub async fn post_message<S>(
    store: &S,
    access: &Access,
    sender_id: &str,
    content: &str,
) -> Result<Message, DevsyncError>
where
    S: MessageStore + ?Sized,
{
    access.require(Capability::Write)?;
    let content = content.trim();
    if content.is_empty() {
        return Err(DevsyncError::validation("content", "must not be empty"));
    }
    let message = store
        .create_message(&access.project.id, sender_id, content)
        .await?;
    debug!(project_id = %message.project_id, message_id = %message.id, "message stored");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::resolve_access;
    use crate::testing::MemoryStore;
    use crate::types::MemberRole;

    #[tokio::test]
    async fn content_is_trimmed() {
        let store = MemoryStore::new();
        let alice = store.add_user("alice@example.com", "Alice");
        let project = store.add_project(&alice.id, "Sprint");
        let access = resolve_access(&store, &alice.id, &project.id).await.unwrap();

        let msg = post_message(&store, &access, &alice.id, "  hi  ").await.unwrap();
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.sender.name, "Alice");
    }

    #[tokio::test]
    async fn blank_content_persists_nothing() {
        let store = MemoryStore::new();
        let alice = store.add_user("alice@example.com", "Alice");
        let project = store.add_project(&alice.id, "Sprint");
        let access = resolve_access(&store, &alice.id, &project.id).await.unwrap();

        for content in ["", "   "] {
            let err = post_message(&store, &access, &alice.id, content).await.unwrap_err();
            assert!(matches!(err, DevsyncError::Validation { ref field, .. } if field == "content"));
        }
        assert!(history(&store, &access).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn viewer_reads_but_cannot_post() {
        let store = MemoryStore::new();
        let alice = store.add_user("alice@example.com", "Alice");
        let carol = store.add_user("carol@example.com", "Carol");
        let project = store.add_project(&alice.id, "Sprint");
        store.put_member(&project.id, &carol.id, MemberRole::Viewer);

        let owner = resolve_access(&store, &alice.id, &project.id).await.unwrap();
        post_message(&store, &owner, &alice.id, "first").await.unwrap();
        post_message(&store, &owner, &alice.id, "second").await.unwrap();

        let viewer = resolve_access(&store, &carol.id, &project.id).await.unwrap();
        let contents: Vec<String> = history(&store, &viewer)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["first", "second"]);

        let err = post_message(&store, &viewer, &carol.id, "hello").await.unwrap_err();
        assert!(matches!(err, DevsyncError::Forbidden(_)));
    }
}
