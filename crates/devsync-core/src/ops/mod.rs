// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain operations.
//!
//! Every operation that touches a project takes an [`Access`](crate::role::Access)
//! and checks its capability before reading or writing anything.

pub mod accounts;
pub mod board;
pub mod chat;
pub mod membership;
pub mod projects;
