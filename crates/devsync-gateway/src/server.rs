// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use devsync_core::{DevsyncError, Store};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, TokenIssuer};
use crate::handlers;
use crate::rooms::RoomHub;
use crate::ws;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Request-handling knobs (mirrors the auth and realtime sections of the
/// configuration file).
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub min_password_len: usize,
    /// Check roles on `joinProject` and `project:message` events.
    pub authenticate_join: bool,
    /// Outbound frame buffer per WebSocket connection.
    pub connection_buffer: usize,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            min_password_len: 6,
            authenticate_join: true,
            connection_buffer: 64,
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Persistence for every entity.
    pub store: Arc<dyn Store>,
    /// Bearer token signing and verification.
    pub tokens: Arc<TokenIssuer>,
    /// Live WebSocket connections and project rooms.
    pub rooms: Arc<RoomHub>,
    pub settings: GatewaySettings,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer, settings: GatewaySettings) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            rooms: Arc::new(RoomHub::new()),
            settings,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }
}

/// Server bind configuration (mirrors the `[server]` section).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Allow any origin.
    pub cors_permissive: bool,
}

/// Build the application router.
///
/// - GET /health (no auth)
/// - POST /auth/register, POST /auth/login (no auth)
/// - GET /ws?token=... (auth during the upgrade)
/// - everything else behind the bearer token middleware
pub fn build_router(state: GatewayState, cors_permissive: bool) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::get_health))
        .route("/auth/register", post(handlers::accounts::register))
        .route("/auth/login", post(handlers::accounts::login))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/auth/me", get(handlers::accounts::me))
        .route(
            "/projects",
            get(handlers::projects::list).post(handlers::projects::create),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::detail).delete(handlers::projects::delete),
        )
        .route(
            "/members/{project_id}",
            get(handlers::members::list).post(handlers::members::invite),
        )
        .route(
            "/members/{project_id}/{user_id}",
            put(handlers::members::change_role).delete(handlers::members::remove),
        )
        .route(
            "/tasks/by-project/{project_id}",
            get(handlers::tasks::list),
        )
        .route("/tasks", post(handlers::tasks::create))
        .route(
            "/tasks/{id}",
            put(handlers::tasks::update).delete(handlers::tasks::delete),
        )
        .route(
            "/messages/by-project/{project_id}",
            get(handlers::messages::list),
        )
        .route("/messages", post(handlers::messages::create))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .with_state(state);

    let cors = if cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the gateway HTTP/WebSocket server and run until `shutdown` resolves.
pub async fn start_server(
    config: ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DevsyncError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DevsyncError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;
    serve_with_listener(listener, state, config.cors_permissive, shutdown).await
}

/// Serve on an already bound listener. Used directly by tests that bind
/// port 0.
pub async fn serve_with_listener(
    listener: tokio::net::TcpListener,
    state: GatewayState,
    cors_permissive: bool,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DevsyncError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("gateway listening on {addr}");
    }
    let app = build_router(state, cors_permissive);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| DevsyncError::Internal(format!("gateway server error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_hardened() {
        let settings = GatewaySettings::default();
        assert!(settings.authenticate_join);
        assert_eq!(settings.min_password_len, 6);
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_permissive: true,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
