// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each function takes `&Database` and runs on the writer thread.

pub mod members;
pub mod messages;
pub mod projects;
pub mod seed;
pub mod tasks;
pub mod users;
