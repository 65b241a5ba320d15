// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for per-project realtime chat.
//!
//! The upgrade request must carry a valid token as `?token=<jwt>`. After that
//! the connection speaks the events in [`devsync_core::realtime`]: clients
//! join one project room at a time and relay persisted chat messages to the
//! other connections in that room. Messages are never echoed to their sender,
//! and errors go to the offending connection only.

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use devsync_core::policy::Capability;
use devsync_core::realtime::{ClientEvent, RelayedMessage, ServerEvent};
use devsync_core::{resolve_access, DevsyncError};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    #[serde(default)]
    token: Option<String>,
}

/// WebSocket upgrade handler. Rejects the upgrade with 401 when the token is
/// missing or invalid.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<GatewayState>,
) -> Result<Response, ApiError> {
    let token = params
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DevsyncError::Unauthorized("missing token".into()))?;
    let user = state.tokens.verify(&token)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user)))
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode server event");
            None
        }
    }
}

fn reply(state: &GatewayState, conn_id: &str, event: ServerEvent) {
    if let Some(frame) = encode(&event) {
        state.rooms.send_to(conn_id, frame);
    }
}

/// Handle an individual WebSocket connection.
///
/// A sender task drains the connection's channel into the socket while the
/// receive loop processes client events.
async fn handle_socket(socket: WebSocket, state: GatewayState, user: AuthUser) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let conn_id = uuid::Uuid::new_v4().to_string();

    let (tx, mut rx) = mpsc::channel::<String>(state.settings.connection_buffer.max(1));
    state.rooms.register(&conn_id, &user.id, tx);
    tracing::debug!(connection_id = %conn_id, user_id = %user.id, "websocket connected");

    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_sender.send(WsMessage::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            WsMessage::Text(text) => {
                let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::debug!(connection_id = %conn_id, error = %e, "unparseable client event");
                        reply(&state, &conn_id, ServerEvent::error("invalid event"));
                        continue;
                    }
                };
                if let Err(reason) = handle_event(&state, &conn_id, &user, event).await {
                    reply(&state, &conn_id, ServerEvent::error(reason));
                }
            }
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    state.rooms.unregister(&conn_id);
    send_task.abort();
    tracing::debug!(connection_id = %conn_id, user_id = %user.id, "websocket disconnected");
}

/// Apply one client event. The error string is sent back to the client.
async fn handle_event(
    state: &GatewayState,
    conn_id: &str,
    user: &AuthUser,
    event: ClientEvent,
) -> Result<(), String> {
    match event {
        ClientEvent::JoinProject(project_id) => {
            if state.settings.authenticate_join {
                check_access(state, user, &project_id, Capability::Read).await?;
            }
            state.rooms.join(conn_id, &project_id);
            tracing::debug!(connection_id = %conn_id, %project_id, "joined project room");
            reply(state, conn_id, ServerEvent::Joined(project_id));
            Ok(())
        }
        ClientEvent::LeaveProject => {
            if let Some(project_id) = state.rooms.leave(conn_id) {
                tracing::debug!(connection_id = %conn_id, %project_id, "left project room");
            }
            Ok(())
        }
        ClientEvent::ProjectMessage(relay) => relay_message(state, conn_id, user, relay).await,
    }
}

async fn relay_message(
    state: &GatewayState,
    conn_id: &str,
    user: &AuthUser,
    relay: RelayedMessage,
) -> Result<(), String> {
    if state.settings.authenticate_join {
        if state.rooms.current_project(conn_id).as_deref() != Some(relay.project_id.as_str()) {
            return Err("join the project before sending messages".into());
        }
        if relay.message.sender_id != user.id {
            return Err("sender does not match the connected user".into());
        }
        if relay.message.project_id != relay.project_id {
            return Err("message belongs to another project".into());
        }
        check_access(state, user, &relay.project_id, Capability::Write).await?;
    }

    let Some(frame) = encode(&ServerEvent::ProjectMessage(relay.message)) else {
        return Err("invalid message".into());
    };
    let delivered = state.rooms.broadcast_from(conn_id, &relay.project_id, &frame);
    tracing::debug!(connection_id = %conn_id, project_id = %relay.project_id, delivered, "message relayed");
    Ok(())
}

/// Role check against fresh storage state.
async fn check_access(
    state: &GatewayState,
    user: &AuthUser,
    project_id: &str,
    capability: Capability,
) -> Result<(), String> {
    let access = match resolve_access(&*state.store, &user.id, project_id).await {
        Ok(access) => access,
        Err(DevsyncError::NotFound(what)) => return Err(format!("{what} not found")),
        Err(e) => {
            tracing::error!(error = %e, %project_id, "role lookup failed");
            return Err("internal server error".into());
        }
    };
    access.require(capability).map_err(|e| match e {
        DevsyncError::Forbidden(reason) => reason,
        other => other.to_string(),
    })
}
