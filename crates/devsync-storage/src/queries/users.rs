// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User account queries.

use devsync_core::types::{new_id, now_timestamp, StoredUser, User};
use devsync_core::DevsyncError;
use rusqlite::{params, OptionalExtension};

use crate::database::{is_unique_violation, Database};

/// Insert a user. A taken email yields `Conflict`.
pub async fn create_user(
    db: &Database,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<User, DevsyncError> {
    let user = User {
        id: new_id(),
        email: email.to_string(),
        name: name.to_string(),
    };
    let password_hash = password_hash.to_string();
    let row = user.clone();
    let inserted = db
        .connection()
        .call(move |conn| {
            let result = conn.execute(
                "INSERT INTO users (id, email, name, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.id, row.email, row.name, password_hash, now_timestamp()],
            );
            match result {
                Ok(_) => Ok(true),
                Err(e) if is_unique_violation(&e) => Ok(false),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if !inserted {
        return Err(DevsyncError::Conflict("email already registered".into()));
    }
    Ok(user)
}

/// Load a user with its password hash for login.
pub async fn find_user_by_email(
    db: &Database,
    email: &str,
) -> Result<Option<StoredUser>, DevsyncError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, email, name, password_hash FROM users WHERE email = ?1",
                params![email],
                |row| {
                    Ok(StoredUser {
                        user: User {
                            id: row.get(0)?,
                            email: row.get(1)?,
                            name: row.get(2)?,
                        },
                        password_hash: row.get(3)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by ID.
pub async fn get_user(db: &Database, id: &str) -> Result<Option<User>, DevsyncError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, email, name FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_find_user() {
        let (db, _dir) = setup_db().await;
        let user = create_user(&db, "alice@example.com", "Alice", "$argon2id$hash")
            .await
            .unwrap();

        let stored = find_user_by_email(&db, "alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user, user);
        assert_eq!(stored.password_hash, "$argon2id$hash");

        assert_eq!(get_user(&db, &user.id).await.unwrap(), Some(user));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let (db, _dir) = setup_db().await;
        create_user(&db, "alice@example.com", "Alice", "h").await.unwrap();
        let err = create_user(&db, "alice@example.com", "Other", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, DevsyncError::Conflict(_)));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let (db, _dir) = setup_db().await;
        assert!(find_user_by_email(&db, "nobody@example.com").await.unwrap().is_none());
        assert!(get_user(&db, "nope").await.unwrap().is_none());
        db.close().await.unwrap();
    }
}
