// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Membership persistence.
//!
//! At most one row exists per (user, project) pair. These are raw storage
//! primitives; owner immunity is enforced by [`crate::ops::membership`].

use async_trait::async_trait;

use crate::error::DevsyncError;
use crate::types::{MemberRole, Membership};

#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Stored role of the user on the project, if a row exists.
    async fn member_role(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<MemberRole>, DevsyncError>;

    /// All membership rows of the project, ordered by user name ascending.
    async fn list_members(&self, project_id: &str) -> Result<Vec<Membership>, DevsyncError>;

    /// Creates the row, or updates its role when one already exists.
    async fn upsert_member(
        &self,
        project_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Membership, DevsyncError>;

    /// Updates the role of an existing row. `None` when no row exists.
    async fn update_member_role(
        &self,
        project_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Option<Membership>, DevsyncError>;

    /// Deletes the row. Returns false when no row existed.
    async fn remove_member(&self, project_id: &str, user_id: &str) -> Result<bool, DevsyncError>;
}
