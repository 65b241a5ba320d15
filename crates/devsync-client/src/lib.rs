// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client side of DevSync.
//!
//! Holds the behaviour every front end needs regardless of presentation: an
//! explicit session object, the chat timeline that reconciles optimistic
//! sends with broadcasts, the readiness gate that waits for a cold server,
//! and typed HTTP and WebSocket clients.

pub mod api;
pub mod error;
pub mod gate;
pub mod realtime;
pub mod session;
pub mod timeline;

pub use api::{ApiClient, NewTaskRequest, ProjectListing, ProjectView, TaskUpdate};
pub use error::ClientError;
pub use gate::{Backoff, HttpHealthProbe, ReadinessGate, ReadinessProbe};
pub use realtime::RealtimeConnection;
pub use session::{Session, SessionState};
pub use timeline::{ChatTimeline, Correlation, SendFailure, TimelineEntry};
