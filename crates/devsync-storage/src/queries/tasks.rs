// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task queries.

use std::str::FromStr;

use devsync_core::types::{new_id, now_timestamp, NewTask, Task, TaskPatch, TaskStatus};
use devsync_core::DevsyncError;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::database::Database;

const TASK_COLUMNS: &str =
    "id, project_id, title, description, status, sort_order, assignee_id, created_at, updated_at";

/// Board order: column, then explicit order, then creation time.
const BOARD_ORDER: &str = "CASE status WHEN 'todo' THEN 0 WHEN 'in_progress' THEN 1 ELSE 2 END,
         sort_order ASC, created_at ASC, id ASC";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status: String = row.get(4)?;
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: TaskStatus::from_str(&status)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
        order: row.get(5)?,
        assignee_id: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn load_task(conn: &Connection, id: &str) -> rusqlite::Result<Option<Task>> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id],
        task_from_row,
    )
    .optional()
}

/// Tasks of a project in board order.
pub async fn list_tasks(db: &Database, project_id: &str) -> Result<Vec<Task>, DevsyncError> {
    let project_id = project_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = ?1 ORDER BY {BOARD_ORDER}"
            ))?;
            let rows = stmt.query_map(params![project_id], task_from_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a task.
pub async fn create_task(db: &Database, new_task: &NewTask) -> Result<Task, DevsyncError> {
    let now = now_timestamp();
    let task = Task {
        id: new_id(),
        project_id: new_task.project_id.clone(),
        title: new_task.title.clone(),
        description: new_task.description.clone(),
        status: new_task.status,
        order: new_task.order,
        assignee_id: None,
        created_at: now.clone(),
        updated_at: now,
    };
    let row = task.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tasks (id, project_id, title, description, status, sort_order,
                                    assignee_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    row.id,
                    row.project_id,
                    row.title,
                    row.description,
                    row.status.to_string(),
                    row.order,
                    row.assignee_id,
                    row.created_at,
                    row.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(task)
}

/// Get a task by ID.
pub async fn get_task(db: &Database, id: &str) -> Result<Option<Task>, DevsyncError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| load_task(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// Apply a partial update. `None` when the task does not exist.
///
/// Read and write happen in one call on the writer thread, so concurrent
/// patches resolve last-write-wins per field set.
pub async fn update_task(
    db: &Database,
    id: &str,
    patch: &TaskPatch,
) -> Result<Option<Task>, DevsyncError> {
    let id = id.to_string();
    let patch = patch.clone();
    db.connection()
        .call(move |conn| {
            let Some(mut task) = load_task(conn, &id)? else {
                return Ok(None);
            };
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            if let Some(order) = patch.order {
                task.order = order;
            }
            if let Some(assignee_id) = patch.assignee_id {
                task.assignee_id = assignee_id;
            }
            task.updated_at = now_timestamp();

            conn.execute(
                "UPDATE tasks SET title = ?1, description = ?2, status = ?3, sort_order = ?4,
                        assignee_id = ?5, updated_at = ?6
                 WHERE id = ?7",
                params![
                    task.title,
                    task.description,
                    task.status.to_string(),
                    task.order,
                    task.assignee_id,
                    task.updated_at,
                    task.id,
                ],
            )?;
            Ok(Some(task))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a task. Returns whether a row existed.
pub async fn delete_task(db: &Database, id: &str) -> Result<bool, DevsyncError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
