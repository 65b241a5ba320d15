// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat message queries. Messages are append-only.

use devsync_core::types::{new_id, now_timestamp, Message, UserSummary};
use devsync_core::DevsyncError;
use rusqlite::{params, OptionalExtension, Row};

use crate::database::Database;

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        project_id: row.get(1)?,
        sender_id: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
        sender: UserSummary {
            id: row.get(2)?,
            name: row.get(5)?,
        },
    })
}

/// Messages of a project in chronological order, with sender names.
pub async fn list_messages(db: &Database, project_id: &str) -> Result<Vec<Message>, DevsyncError> {
    let project_id = project_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT m.id, m.project_id, m.sender_id, m.content, m.created_at, u.name
                 FROM messages m JOIN users u ON u.id = m.sender_id
                 WHERE m.project_id = ?1
                 ORDER BY m.created_at ASC, m.rowid ASC",
            )?;
            let rows = stmt.query_map(params![project_id], message_from_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a message and return it with its sender summary.
pub async fn create_message(
    db: &Database,
    project_id: &str,
    sender_id: &str,
    content: &str,
) -> Result<Message, DevsyncError> {
    let id = new_id();
    let project_id = project_id.to_string();
    let sender_id = sender_id.to_string();
    let content = content.to_string();
    let created = db
        .connection()
        .call(move |conn| {
            let Some(name) = conn
                .query_row(
                    "SELECT name FROM users WHERE id = ?1",
                    params![sender_id],
                    |row| row.get::<_, String>(0),
                )
                .optional()?
            else {
                return Ok(None);
            };
            let created_at = now_timestamp();
            conn.execute(
                "INSERT INTO messages (id, project_id, sender_id, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, project_id, sender_id, content, created_at],
            )?;
            Ok(Some(Message {
                id,
                project_id,
                sender: UserSummary {
                    id: sender_id.clone(),
                    name,
                },
                sender_id,
                content,
                created_at,
            }))
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    created.ok_or_else(|| DevsyncError::not_found("sender"))
}
