// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Realtime wire events exchanged over the WebSocket connection.
//!
//! Every frame is a JSON text frame of the form `{"event": ..., "data": ...}`.
//!
//! Client -> Server:
//! ```json
//! {"event": "joinProject", "data": "<projectId>"}
//! {"event": "leaveProject"}
//! {"event": "project:message", "data": {"projectId": "...", "message": {...}}}
//! ```
//!
//! Server -> Client:
//! ```json
//! {"event": "joined", "data": "<projectId>"}
//! {"event": "project:message", "data": {...message...}}
//! {"event": "error", "data": {"message": "..."}}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Name of the broadcast room of a project.
pub fn room_name(project_id: &str) -> String {
    format!("project:{project_id}")
}

/// A message relayed from one client to the rest of its project room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayedMessage {
    pub project_id: String,
    pub message: Message,
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "joinProject")]
    JoinProject(String),
    #[serde(rename = "leaveProject")]
    LeaveProject,
    #[serde(rename = "project:message")]
    ProjectMessage(RelayedMessage),
}

/// Error payload sent to a single connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventError {
    pub message: String,
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "joined")]
    Joined(String),
    #[serde(rename = "project:message")]
    ProjectMessage(Message),
    #[serde(rename = "error")]
    Error(EventError),
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(EventError {
            message: message.into(),
        })
    }
}
