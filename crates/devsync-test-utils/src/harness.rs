// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.

use std::sync::Arc;
use std::time::Duration;

use devsync_client::{ApiClient, ClientError, RealtimeConnection, Session};
use devsync_config::model::StorageConfig;
use devsync_core::{DevsyncError, StorageAdapter, Store};
use devsync_gateway::{serve_with_listener, GatewaySettings, GatewayState, TokenIssuer};
use devsync_storage::SqliteStore;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Signing secret used by every harness.
pub const TEST_JWT_SECRET: &str = "devsync-test-secret-0123456789";

/// Password given to users created through [`TestHarness::register_user`].
pub const TEST_PASSWORD: &str = "password123";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    settings: GatewaySettings,
    token_ttl_minutes: u64,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            settings: GatewaySettings::default(),
            token_ttl_minutes: 60,
        }
    }

    /// Toggle role checks on realtime join and relay.
    pub fn with_authenticate_join(mut self, enabled: bool) -> Self {
        self.settings.authenticate_join = enabled;
        self
    }

    pub fn with_token_ttl_minutes(mut self, minutes: u64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    /// Open the database, bind `127.0.0.1:0` and start serving.
    pub async fn build(self) -> Result<TestHarness, DevsyncError> {
        let temp_dir = tempfile::TempDir::new().map_err(DevsyncError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        store.initialize().await?;
        let store: Arc<dyn Store> = Arc::new(store);

        let state = GatewayState::new(
            store.clone(),
            TokenIssuer::new(TEST_JWT_SECRET, self.token_ttl_minutes),
            self.settings,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| DevsyncError::Internal(format!("bind failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| DevsyncError::Internal(format!("no local address: {e}")))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server_state = state.clone();
        let server = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = serve_with_listener(listener, server_state, true, shutdown).await {
                tracing::error!(error = %e, "test server stopped");
            }
        });

        let base_url = format!("http://{addr}");
        let client = ApiClient::new(&base_url).map_err(|e| DevsyncError::Internal(e.to_string()))?;

        Ok(TestHarness {
            base_url,
            client,
            store,
            state,
            shutdown: Some(shutdown_tx),
            server,
            _temp_dir: temp_dir,
        })
    }
}

/// A running gateway with temp storage, shut down on drop.
pub struct TestHarness {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    /// API client pointed at the server.
    pub client: ApiClient,
    /// The store behind the server, for direct assertions.
    pub store: Arc<dyn Store>,
    /// Server state, for inspecting rooms.
    pub state: GatewayState,
    shutdown: Option<oneshot::Sender<()>>,
    server: JoinHandle<()>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with default settings.
    pub async fn start() -> Result<Self, DevsyncError> {
        Self::builder().build().await
    }

    /// Register a user with [`TEST_PASSWORD`] and return its session.
    pub async fn register_user(&self, email: &str, name: &str) -> Result<Session, ClientError> {
        self.client.register(email, name, TEST_PASSWORD).await
    }

    /// Open a realtime connection for `session`.
    pub async fn connect(&self, session: &Session) -> Result<RealtimeConnection, ClientError> {
        RealtimeConnection::connect(&self.base_url, session).await
    }

    /// Stop the server and wait for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if tokio::time::timeout(Duration::from_secs(5), &mut self.server)
            .await
            .is_err()
        {
            tracing::warn!("test server did not stop in time");
            self.server.abort();
        }
        if let Err(e) = self.store.close().await {
            tracing::warn!(error = %e, "closing test store failed");
        }
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
