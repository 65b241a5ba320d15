// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-project broadcast rooms for WebSocket connections.
//!
//! A connection is in at most one room at a time. Joining a room leaves the
//! previous one. Fan-out uses `try_send`, so a slow connection drops frames
//! instead of stalling the sender.

use std::collections::HashSet;

use dashmap::DashMap;
use devsync_core::realtime::room_name;
use tokio::sync::mpsc;

struct Connection {
    user_id: String,
    tx: mpsc::Sender<String>,
    room: Option<String>,
}

/// Registry of live connections and the rooms they have joined.
///
/// Guards on the two maps are never held at the same time.
#[derive(Default)]
pub struct RoomHub {
    connections: DashMap<String, Connection>,
    rooms: DashMap<String, HashSet<String>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new connection. It starts outside every room.
    pub fn register(&self, conn_id: &str, user_id: &str, tx: mpsc::Sender<String>) {
        self.connections.insert(
            conn_id.to_string(),
            Connection {
                user_id: user_id.to_string(),
                tx,
                room: None,
            },
        );
    }

    /// Forget a connection and remove it from its room.
    pub fn unregister(&self, conn_id: &str) {
        if let Some((_, conn)) = self.connections.remove(conn_id) {
            if let Some(room) = conn.room {
                self.remove_from_room(&room, conn_id);
            }
        }
    }

    /// Put the connection in the room of `project_id`, leaving any previous
    /// room. Returns the project id of the room that was left.
    pub fn join(&self, conn_id: &str, project_id: &str) -> Option<String> {
        let room = room_name(project_id);
        let previous = {
            let mut conn = self.connections.get_mut(conn_id)?;
            conn.room.replace(room.clone())
        };
        if let Some(prev) = &previous {
            if prev != &room {
                self.remove_from_room(prev, conn_id);
            }
        }
        self.rooms
            .entry(room)
            .or_default()
            .insert(conn_id.to_string());
        previous.and_then(|r| r.strip_prefix("project:").map(str::to_string))
    }

    /// Leave the current room, returning its project id.
    pub fn leave(&self, conn_id: &str) -> Option<String> {
        let room = self.connections.get_mut(conn_id)?.room.take()?;
        self.remove_from_room(&room, conn_id);
        room.strip_prefix("project:").map(str::to_string)
    }

    /// Project id of the room the connection is in.
    pub fn current_project(&self, conn_id: &str) -> Option<String> {
        let conn = self.connections.get(conn_id)?;
        conn.room
            .as_deref()
            .and_then(|r| r.strip_prefix("project:"))
            .map(str::to_string)
    }

    /// User behind a connection.
    pub fn user_of(&self, conn_id: &str) -> Option<String> {
        self.connections.get(conn_id).map(|c| c.user_id.clone())
    }

    /// Send a frame to a single connection.
    pub fn send_to(&self, conn_id: &str, frame: String) -> bool {
        let Some(tx) = self.connections.get(conn_id).map(|c| c.tx.clone()) else {
            return false;
        };
        tx.try_send(frame).is_ok()
    }

    /// Deliver `frame` to every connection in the project's room except
    /// `sender`. Returns how many connections accepted the frame.
    pub fn broadcast_from(&self, sender: &str, project_id: &str, frame: &str) -> usize {
        let targets: Vec<String> = match self.rooms.get(&room_name(project_id)) {
            Some(members) => members.iter().filter(|id| *id != sender).cloned().collect(),
            None => return 0,
        };
        let mut delivered = 0;
        for target in targets {
            let Some(tx) = self.connections.get(&target).map(|c| c.tx.clone()) else {
                continue;
            };
            match tx.try_send(frame.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(connection_id = %target, %project_id, error = %e, "dropping realtime frame");
                }
            }
        }
        delivered
    }

    /// Number of connections in the project's room.
    pub fn room_size(&self, project_id: &str) -> usize {
        self.rooms
            .get(&room_name(project_id))
            .map(|m| m.len())
            .unwrap_or(0)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn remove_from_room(&self, room: &str, conn_id: &str) {
        self.rooms.remove_if_mut(room, |_, members| {
            members.remove(conn_id);
            members.is_empty()
        });
    }
}
