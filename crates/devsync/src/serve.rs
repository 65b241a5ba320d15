// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `devsync serve` command implementation.
//!
//! Opens SQLite storage, builds the gateway state from configuration and
//! serves until Ctrl-C.

use std::sync::Arc;

use devsync_config::model::DevsyncConfig;
use devsync_core::{DevsyncError, StorageAdapter, Store};
use devsync_gateway::{start_server, GatewaySettings, GatewayState, ServerConfig, TokenIssuer};
use devsync_storage::SqliteStore;
use tracing::{error, info};

/// Gateway knobs taken from the auth and realtime sections.
fn gateway_settings(config: &DevsyncConfig) -> GatewaySettings {
    GatewaySettings {
        min_password_len: config.auth.min_password_len,
        authenticate_join: config.realtime.authenticate_join,
        connection_buffer: config.realtime.connection_buffer,
    }
}

/// Runs the `devsync serve` command.
pub async fn run_serve(config: DevsyncConfig) -> Result<(), DevsyncError> {
    let secret = config.auth.jwt_secret.clone().ok_or_else(|| {
        DevsyncError::Config(
            "auth.jwt_secret is not set (config file or DEVSYNC_AUTH_JWT_SECRET)".into(),
        )
    })?;

    init_tracing(&config.log.level);
    info!(
        database = %config.storage.database_path,
        authenticate_join = config.realtime.authenticate_join,
        "starting devsync"
    );

    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    let store: Arc<dyn Store> = Arc::new(store);

    let state = GatewayState::new(
        store.clone(),
        TokenIssuer::new(&secret, config.auth.token_ttl_minutes),
        gateway_settings(&config),
    );
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        cors_permissive: config.server.cors_permissive,
    };

    let served = start_server(server_config, state, shutdown_signal()).await;
    if let Err(e) = store.close().await {
        error!(error = %e, "failed to close storage cleanly");
    }
    served?;
    info!("devsync stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => error!(error = %e, "failed to listen for ctrl-c"),
    }
}

/// Initializes the tracing subscriber with the given log level.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "devsync={log_level},devsync_core={log_level},devsync_storage={log_level},devsync_gateway={log_level},tower_http={log_level},warn"
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
