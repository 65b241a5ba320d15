// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage lifecycle trait and the combined store bound.

use async_trait::async_trait;

use crate::error::DevsyncError;
use crate::traits::{MembershipStore, MessageStore, ProjectStore, TaskStore, UserStore};
use crate::types::HealthStatus;

/// Lifecycle of a persistence backend.
#[async_trait]
pub trait StorageAdapter: Send + Sync + 'static {
    /// Opens connections and applies migrations.
    async fn initialize(&self) -> Result<(), DevsyncError>;

    /// Flushes pending writes and releases connections.
    async fn close(&self) -> Result<(), DevsyncError>;

    /// Performs a round trip against the backend.
    async fn health_check(&self) -> Result<HealthStatus, DevsyncError>;
}

/// Everything the gateway needs from persistence.
pub trait Store:
    StorageAdapter + UserStore + ProjectStore + MembershipStore + TaskStore + MessageStore
{
}

impl<T> Store for T where
    T: StorageAdapter + UserStore + ProjectStore + MembershipStore + TaskStore + MessageStore
{
}
