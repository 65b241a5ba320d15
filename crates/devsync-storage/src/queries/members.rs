// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Membership queries. At most one row exists per (user, project).

use std::str::FromStr;

use devsync_core::types::{new_id, now_timestamp, MemberRole, Membership, User};
use devsync_core::DevsyncError;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::database::Database;

const MEMBERSHIP_SELECT: &str = "SELECT m.id, m.project_id, m.user_id, m.role, m.created_at,
        u.id, u.email, u.name
   FROM members m JOIN users u ON u.id = m.user_id";

fn parse_role(idx: usize, raw: String) -> rusqlite::Result<MemberRole> {
    MemberRole::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn membership_from_row(row: &Row<'_>) -> rusqlite::Result<Membership> {
    Ok(Membership {
        id: row.get(0)?,
        project_id: row.get(1)?,
        user_id: row.get(2)?,
        role: parse_role(3, row.get(3)?)?,
        created_at: row.get(4)?,
        user: User {
            id: row.get(5)?,
            email: row.get(6)?,
            name: row.get(7)?,
        },
    })
}

fn load_membership(
    conn: &Connection,
    project_id: &str,
    user_id: &str,
) -> rusqlite::Result<Option<Membership>> {
    conn.query_row(
        &format!("{MEMBERSHIP_SELECT} WHERE m.project_id = ?1 AND m.user_id = ?2"),
        params![project_id, user_id],
        membership_from_row,
    )
    .optional()
}

/// Stored role of the user on the project, if any.
pub async fn member_role(
    db: &Database,
    project_id: &str,
    user_id: &str,
) -> Result<Option<MemberRole>, DevsyncError> {
    let project_id = project_id.to_string();
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let raw: Option<String> = conn
                .query_row(
                    "SELECT role FROM members WHERE project_id = ?1 AND user_id = ?2",
                    params![project_id, user_id],
                    |row| row.get(0),
                )
                .optional()?;
            raw.map(|r| parse_role(0, r)).transpose()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Memberships of a project with user identities, ordered by user name.
pub async fn list_members(db: &Database, project_id: &str) -> Result<Vec<Membership>, DevsyncError> {
    let project_id = project_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{MEMBERSHIP_SELECT} WHERE m.project_id = ?1 ORDER BY u.name ASC, u.id ASC"
            ))?;
            let rows = stmt.query_map(params![project_id], membership_from_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a membership or overwrite the role of the existing one.
pub async fn upsert_member(
    db: &Database,
    project_id: &str,
    user_id: &str,
    role: MemberRole,
) -> Result<Membership, DevsyncError> {
    let project_id = project_id.to_string();
    let user_id = user_id.to_string();
    let membership = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO members (id, project_id, user_id, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (user_id, project_id) DO UPDATE SET role = excluded.role",
                params![new_id(), project_id, user_id, role.to_string(), now_timestamp()],
            )?;
            load_membership(conn, &project_id, &user_id)
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    membership.ok_or_else(|| DevsyncError::Internal("membership vanished after upsert".into()))
}

/// Change the role of an existing membership. `None` when there is no row.
pub async fn update_member_role(
    db: &Database,
    project_id: &str,
    user_id: &str,
    role: MemberRole,
) -> Result<Option<Membership>, DevsyncError> {
    let project_id = project_id.to_string();
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE members SET role = ?1 WHERE project_id = ?2 AND user_id = ?3",
                params![role.to_string(), project_id, user_id],
            )?;
            if updated == 0 {
                return Ok(None);
            }
            load_membership(conn, &project_id, &user_id)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a membership. Returns whether a row existed.
pub async fn remove_member(
    db: &Database,
    project_id: &str,
    user_id: &str,
) -> Result<bool, DevsyncError> {
    let project_id = project_id.to_string();
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM members WHERE project_id = ?1 AND user_id = ?2",
                params![project_id, user_id],
            )?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{projects, users};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    async fn user(db: &Database, email: &str, name: &str) -> User {
        users::create_user(db, email, name, "h").await.unwrap()
    }

    #[tokio::test]
    async fn upsert_is_idempotent_and_keeps_latest_role() {
        let (db, _dir) = setup_db().await;
        let alice = user(&db, "alice@example.com", "Alice").await;
        let bob = user(&db, "bob@example.com", "Bob").await;
        let project = projects::create_project(&db, &alice.id, "Sprint", None)
            .await
            .unwrap();

        let first = upsert_member(&db, &project.id, &bob.id, MemberRole::Member)
            .await
            .unwrap();
        let second = upsert_member(&db, &project.id, &bob.id, MemberRole::Viewer)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.role, MemberRole::Viewer);
        assert_eq!(second.user.email, "bob@example.com");

        let listed = list_members(&db, &project.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            member_role(&db, &project.id, &bob.id).await.unwrap(),
            Some(MemberRole::Viewer)
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let (db, _dir) = setup_db().await;
        let owner = user(&db, "owner@example.com", "Owner").await;
        let zed = user(&db, "zed@example.com", "Zed").await;
        let amy = user(&db, "amy@example.com", "Amy").await;
        let project = projects::create_project(&db, &owner.id, "Sprint", None)
            .await
            .unwrap();
        upsert_member(&db, &project.id, &zed.id, MemberRole::Member)
            .await
            .unwrap();
        upsert_member(&db, &project.id, &amy.id, MemberRole::Admin)
            .await
            .unwrap();

        let names: Vec<String> = list_members(&db, &project.id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.user.name)
            .collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_and_remove_report_missing_rows() {
        let (db, _dir) = setup_db().await;
        let alice = user(&db, "alice@example.com", "Alice").await;
        let bob = user(&db, "bob@example.com", "Bob").await;
        let project = projects::create_project(&db, &alice.id, "Sprint", None)
            .await
            .unwrap();

        assert!(update_member_role(&db, &project.id, &bob.id, MemberRole::Admin)
            .await
            .unwrap()
            .is_none());
        assert!(!remove_member(&db, &project.id, &bob.id).await.unwrap());

        upsert_member(&db, &project.id, &bob.id, MemberRole::Member)
            .await
            .unwrap();
        let updated = update_member_role(&db, &project.id, &bob.id, MemberRole::Admin)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.role, MemberRole::Admin);
        assert!(remove_member(&db, &project.id, &bob.id).await.unwrap());
        assert!(member_role(&db, &project.id, &bob.id).await.unwrap().is_none());
        db.close().await.unwrap();
    }
}
