// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `devsync seed` command: demo account, project, tasks and messages.

use devsync_config::model::DevsyncConfig;
use devsync_core::{DevsyncError, StorageAdapter};
use devsync_gateway::hash_password;
use devsync_storage::{SeedOutcome, SqliteStore, DEMO_EMAIL, DEMO_PASSWORD};

/// Seed an initialized store.
async fn seed_store(store: &SqliteStore) -> Result<SeedOutcome, DevsyncError> {
    let hash = tokio::task::spawn_blocking(|| hash_password(DEMO_PASSWORD))
        .await
        .map_err(|e| DevsyncError::Internal(format!("hashing task failed: {e}")))??;
    store.seed_demo(&hash).await
}

/// Runs the `devsync seed` command.
pub async fn run_seed(config: DevsyncConfig) -> Result<(), DevsyncError> {
    crate::serve::init_tracing(&config.log.level);

    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    let outcome = seed_store(&store).await;
    store.close().await?;

    match outcome? {
        SeedOutcome::Created { project_id, .. } => {
            println!("devsync: seeded demo project {project_id}");
            println!("  login: {DEMO_EMAIL} / {DEMO_PASSWORD}");
        }
        SeedOutcome::AlreadySeeded { .. } => {
            println!("devsync: demo user {DEMO_EMAIL} already exists, nothing to do");
        }
    }
    Ok(())
}
