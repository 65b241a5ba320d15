// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the stores, the gateway and the client.
//!
//! Identifiers are UUID v4 strings and timestamps are RFC 3339 strings with
//! millisecond precision (`2026-01-01T00:00:00.000Z`), which sort
//! lexicographically in chronological order.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Current time formatted the way every persisted timestamp is formatted.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Generate a fresh entity identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Health status reported by storage health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Fully operational.
    Healthy,
    /// Not operational.
    Unhealthy(String),
}

/// Public identity of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A user together with its password credential, as loaded for login.
#[derive(Clone)]
pub struct StoredUser {
    pub user: User,
    /// Argon2id PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for StoredUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredUser")
            .field("user", &self.user)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

/// Sender identity embedded in chat messages. Deliberately carries no email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
}

/// A project. The owner is a plain user reference, never a membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Role that can be stored on a membership row. `OWNER` is never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Member,
    Viewer,
}

impl Default for MemberRole {
    fn default() -> Self {
        Self::Member
    }
}

/// A membership row with the member's identity embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub user: User,
    pub created_at: String,
}

/// Kanban column of a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All columns in board order.
    pub const COLUMNS: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Position of the column on the board, used as the primary sort key.
    pub fn column_index(self) -> i64 {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        }
    }
}

/// A task on a project's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub order: i64,
    pub assignee_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated input for task creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub order: i64,
}

/// Partial task update. `None` leaves a field untouched; for the nullable
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub order: Option<i64>,
    pub assignee_id: Option<Option<String>>,
}

impl TaskPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.order.is_none()
            && self.assignee_id.is_none()
    }
}

/// A persisted chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub project_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: String,
    pub sender: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn member_role_wire_format() {
        assert_eq!(serde_json::to_string(&MemberRole::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(MemberRole::from_str("VIEWER").unwrap(), MemberRole::Viewer);
        assert_eq!(MemberRole::default(), MemberRole::Member);
        assert!(serde_json::from_str::<MemberRole>("\"OWNER\"").is_err());
    }

    #[test]
    fn task_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(TaskStatus::from_str("done").unwrap(), TaskStatus::Done);
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn columns_are_in_board_order() {
        let indices: Vec<i64> = TaskStatus::COLUMNS.iter().map(|s| s.column_index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: "t1".into(),
            project_id: "p1".into(),
            title: "Write docs".into(),
            description: None,
            status: TaskStatus::Todo,
            order: 3,
            assignee_id: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["projectId"], "p1");
        assert_eq!(json["assigneeId"], serde_json::Value::Null);
        assert_eq!(json["status"], "todo");
    }

    #[test]
    fn empty_patch() {
        assert!(TaskPatch::default().is_empty());
        let patch = TaskPatch {
            assignee_id: Some(None),
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let a = now_timestamp();
        let b = now_timestamp();
        assert!(a <= b);
        assert!(a.ends_with('Z'));
    }

    #[test]
    fn stored_user_debug_redacts_hash() {
        let stored = StoredUser {
            user: User {
                id: "u1".into(),
                email: "a@b.c".into(),
                name: "A".into(),
            },
            password_hash: "$argon2id$secret".into(),
        };
        assert!(!format!("{stored:?}").contains("argon2id"));
    }
}
