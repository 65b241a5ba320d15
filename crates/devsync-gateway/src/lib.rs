// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for DevSync.
//!
//! Exposes the REST API over projects, memberships, tasks and chat messages,
//! bearer-token authentication, and a WebSocket endpoint that fans chat
//! messages out to the other connections joined to the same project room.
//! Every authorization decision resolves the caller's role fresh from the
//! store.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod rooms;
pub mod server;
pub mod ws;

pub use auth::{hash_password, verify_password, AuthUser, TokenIssuer};
pub use error::{ApiError, ErrorBody};
pub use rooms::RoomHub;
pub use server::{
    build_router, serve_with_listener, start_server, GatewaySettings, GatewayState, ServerConfig,
};
