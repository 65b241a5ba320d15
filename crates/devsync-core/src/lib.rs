// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for DevSync.
//!
//! This crate provides the domain types, the error taxonomy, role resolution,
//! the authorization policy, the realtime wire events and the store traits
//! used throughout the DevSync workspace. Storage backends implement the
//! traits defined here.

pub mod error;
pub mod ops;
pub mod policy;
pub mod realtime;
pub mod role;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key items at crate root for ergonomic imports.
pub use error::DevsyncError;
pub use policy::Capability;
pub use role::{resolve_access, resolve_role, Access, Role};
pub use types::{
    HealthStatus, MemberRole, Membership, Message, Project, Task, TaskPatch, TaskStatus, User,
    UserSummary,
};

// Re-export all store traits at crate root.
pub use traits::{
    MembershipStore, MessageStore, ProjectStore, StorageAdapter, Store, TaskStore, UserStore,
};
