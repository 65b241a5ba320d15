// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project queries.

use devsync_core::types::{new_id, now_timestamp, Project};
use devsync_core::DevsyncError;
use rusqlite::{params, OptionalExtension, Row};

use crate::database::Database;

const PROJECT_COLUMNS: &str = "id, name, description, owner_id, created_at, updated_at";

pub(crate) fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        owner_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Insert a project. No membership row is written for the owner.
pub async fn create_project(
    db: &Database,
    owner_id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<Project, DevsyncError> {
    let now = now_timestamp();
    let project = Project {
        id: new_id(),
        name: name.to_string(),
        description: description.map(str::to_string),
        owner_id: owner_id.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    let row = project.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO projects (id, name, description, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.id,
                    row.name,
                    row.description,
                    row.owner_id,
                    row.created_at,
                    row.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(project)
}

/// Get a project by ID.
pub async fn get_project(db: &Database, id: &str) -> Result<Option<Project>, DevsyncError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                params![id],
                project_from_row,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Projects owned by, or shared with, the user. Newest first.
pub async fn list_projects_for_user(
    db: &Database,
    user_id: &str,
) -> Result<Vec<Project>, DevsyncError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects
                 WHERE owner_id = ?1
                    OR id IN (SELECT project_id FROM members WHERE user_id = ?1)
                 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt.query_map(params![user_id], project_from_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a project. Tasks, messages and memberships go with it.
pub async fn delete_project(db: &Database, id: &str) -> Result<bool, DevsyncError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
