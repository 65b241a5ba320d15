// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo data for local development.

use devsync_core::types::{new_id, now_timestamp, TaskStatus};
use devsync_core::DevsyncError;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;

pub const DEMO_EMAIL: &str = "demo@devsync.app";
pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_PROJECT: &str = "DevSync Demo";

const DEMO_TASKS: [(&str, &str, TaskStatus, i64); 3] = [
    (
        "Set up the board",
        "Create the columns and invite the team",
        TaskStatus::Todo,
        1,
    ),
    (
        "Wire up realtime chat",
        "Messages should appear for everyone in the room",
        TaskStatus::InProgress,
        2,
    ),
    (
        "Sign in",
        "Log in with the demo account",
        TaskStatus::Done,
        3,
    ),
];

const DEMO_MESSAGES: [&str; 2] = [
    "Welcome to DevSync!",
    "Drag tasks between columns and chat here in realtime.",
];

/// What a seed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The demo user, project, tasks and messages were created.
    Created { user_id: String, project_id: String },
    /// The demo user already existed; nothing was written.
    AlreadySeeded { user_id: String },
}

/// Create the demo account and project in a single transaction.
///
/// Idempotent on the demo user: if the email is taken, nothing is written.
pub async fn seed_demo(db: &Database, password_hash: &str) -> Result<SeedOutcome, DevsyncError> {
    let password_hash = password_hash.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let existing: Option<String> = tx
                .query_row(
                    "SELECT id FROM users WHERE email = ?1",
                    params![DEMO_EMAIL],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(user_id) = existing {
                tx.commit()?;
                return Ok(SeedOutcome::AlreadySeeded { user_id });
            }

            let now = now_timestamp();
            let user_id = new_id();
            tx.execute(
                "INSERT INTO users (id, email, name, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![user_id, DEMO_EMAIL, DEMO_NAME, password_hash, now],
            )?;

            let project_id = new_id();
            tx.execute(
                "INSERT INTO projects (id, name, description, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    project_id,
                    DEMO_PROJECT,
                    "A sample project to explore the board and chat",
                    user_id,
                    now
                ],
            )?;

            for (title, description, status, order) in DEMO_TASKS {
                tx.execute(
                    "INSERT INTO tasks (id, project_id, title, description, status, sort_order,
                                        created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                    params![
                        new_id(),
                        project_id,
                        title,
                        description,
                        status.to_string(),
                        order,
                        now
                    ],
                )?;
            }

            for content in DEMO_MESSAGES {
                tx.execute(
                    "INSERT INTO messages (id, project_id, sender_id, content, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![new_id(), project_id, user_id, content, now_timestamp()],
                )?;
            }

            tx.commit()?;
            Ok(SeedOutcome::Created {
                user_id,
                project_id,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}
