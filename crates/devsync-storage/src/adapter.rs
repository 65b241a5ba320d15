// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the store traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use devsync_config::model::StorageConfig;
use devsync_core::types::{
    HealthStatus, MemberRole, Membership, Message, NewTask, Project, StoredUser, Task, TaskPatch,
    User,
};
use devsync_core::{
    DevsyncError, MembershipStore, MessageStore, ProjectStore, StorageAdapter, TaskStore,
    UserStore,
};

use crate::database::Database;
use crate::queries;
use crate::queries::seed::SeedOutcome;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened on the first call to
/// [`StorageAdapter::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, DevsyncError> {
        self.db.get().ok_or_else(|| DevsyncError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Write the demo account and project. See [`queries::seed::seed_demo`].
    pub async fn seed_demo(&self, password_hash: &str) -> Result<SeedOutcome, DevsyncError> {
        queries::seed::seed_demo(self.db()?, password_hash).await
    }
}

#[async_trait]
impl StorageAdapter for SqliteStore {
    async fn initialize(&self) -> Result<(), DevsyncError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| DevsyncError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), DevsyncError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, DevsyncError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("storage not initialized".into()));
        };
        let probe = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        Ok(match probe {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, DevsyncError> {
        queries::users::create_user(self.db()?, email, name, password_hash).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, DevsyncError> {
        queries::users::find_user_by_email(self.db()?, email).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, DevsyncError> {
        queries::users::get_user(self.db()?, id).await
    }
}

#[async_trait]
impl ProjectStore for SqliteStore {
    async fn create_project(
        &self,
        owner_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, DevsyncError> {
        queries::projects::create_project(self.db()?, owner_id, name, description).await
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, DevsyncError> {
        queries::projects::get_project(self.db()?, id).await
    }

    async fn list_projects_for_user(&self, user_id: &str) -> Result<Vec<Project>, DevsyncError> {
        queries::projects::list_projects_for_user(self.db()?, user_id).await
    }

    async fn delete_project(&self, id: &str) -> Result<bool, DevsyncError> {
        queries::projects::delete_project(self.db()?, id).await
    }
}

#[async_trait]
impl MembershipStore for SqliteStore {
    async fn member_role(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<MemberRole>, DevsyncError> {
        queries::members::member_role(self.db()?, project_id, user_id).await
    }

    async fn list_members(&self, project_id: &str) -> Result<Vec<Membership>, DevsyncError> {
        queries::members::list_members(self.db()?, project_id).await
    }

    async fn upsert_member(
        &self,
        project_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Membership, DevsyncError> {
        queries::members::upsert_member(self.db()?, project_id, user_id, role).await
    }

    async fn update_member_role(
        &self,
        project_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Option<Membership>, DevsyncError> {
        queries::members::update_member_role(self.db()?, project_id, user_id, role).await
    }

    async fn remove_member(&self, project_id: &str, user_id: &str) -> Result<bool, DevsyncError> {
        queries::members::remove_member(self.db()?, project_id, user_id).await
    }
}

#[async_trait]
impl TaskStore for SqliteStore {
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, DevsyncError> {
        queries::tasks::list_tasks(self.db()?, project_id).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, DevsyncError> {
        queries::tasks::create_task(self.db()?, task).await
    }

    async fn get_task(&self, id: &str) -> Result<Option<Task>, DevsyncError> {
        queries::tasks::get_task(self.db()?, id).await
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, DevsyncError> {
        queries::tasks::update_task(self.db()?, id, patch).await
    }

    async fn delete_task(&self, id: &str) -> Result<bool, DevsyncError> {
        queries::tasks::delete_task(self.db()?, id).await
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn list_messages(&self, project_id: &str) -> Result<Vec<Message>, DevsyncError> {
        queries::messages::list_messages(self.db()?, project_id).await
    }

    async fn create_message(
        &self,
        project_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, DevsyncError> {
        queries::messages::create_message(self.db()?, project_id, sender_id, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devsync_core::ops::{board, membership, projects};
    use devsync_core::resolve_access;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert!(matches!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        assert!(store.initialize().await.is_err());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(make_config(
            dir.path().join("x.db").to_str().unwrap(),
        ));
        assert!(matches!(
            store.get_user("u").await.unwrap_err(),
            DevsyncError::Storage { .. }
        ));
    }

    #[tokio::test]
    async fn domain_operations_run_against_sqlite() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(make_config(
            dir.path().join("ops.db").to_str().unwrap(),
        ));
        store.initialize().await.unwrap();

        let alice = store
            .create_user("alice@example.com", "Alice", "h")
            .await
            .unwrap();
        let bob = store.create_user("bob@example.com", "Bob", "h").await.unwrap();
        let project = projects::create_project(&store, &alice.id, "Sprint", None)
            .await
            .unwrap();

        let owner = resolve_access(&store, &alice.id, &project.id).await.unwrap();
        membership::invite_member(&store, &owner, "BOB@example.com", Some(MemberRole::Member))
            .await
            .unwrap();

        let member = resolve_access(&store, &bob.id, &project.id).await.unwrap();
        let err = board::create_task(
            &store,
            &member,
            board::TaskDraft {
                title: "Nope".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DevsyncError::Forbidden(_)));

        let detail = projects::project_detail(&store, &member).await.unwrap();
        assert_eq!(detail.listing.owner.id, alice.id);
        assert_eq!(detail.listing.members.len(), 1);
        store.close().await.unwrap();
    }
}
