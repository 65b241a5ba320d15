// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User persistence.

use async_trait::async_trait;

use crate::error::DevsyncError;
use crate::types::{StoredUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails with `Conflict` when the email is taken.
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, DevsyncError>;

    /// Looks up a user with its credential by exact email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, DevsyncError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, DevsyncError>;
}
