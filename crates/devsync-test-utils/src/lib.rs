// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for DevSync integration tests.
//!
//! [`TestHarness`] runs a real gateway on an ephemeral local port against a
//! temporary SQLite database and hands out typed clients for it.

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder};
