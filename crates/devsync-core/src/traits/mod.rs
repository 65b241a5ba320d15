// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait definitions.
//!
//! Each persisted entity has its own trait so the domain operations can state
//! exactly which stores they touch. All traits use `#[async_trait]` for
//! dynamic dispatch compatibility.

pub mod members;
pub mod messages;
pub mod projects;
pub mod storage;
pub mod tasks;
pub mod users;

pub use members::MembershipStore;
pub use messages::MessageStore;
pub use projects::ProjectStore;
pub use storage::{Store, StorageAdapter};
pub use tasks::TaskStore;
pub use users::UserStore;
