// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Liveness endpoint polled by clients before they proceed.

use axum::{extract::State, http::StatusCode, Json};
use devsync_core::HealthStatus;
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub uptime_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
///
/// 200 with `ok: true` when storage answers, 503 with `ok: false` otherwise.
pub async fn get_health(State(state): State<GatewayState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime_secs = state.health.start_time.elapsed().as_secs();
    let problem = match state.store.health_check().await {
        Ok(HealthStatus::Healthy) => None,
        Ok(HealthStatus::Unhealthy(reason)) => Some(reason),
        Err(e) => Some(e.to_string()),
    };
    if let Some(reason) = &problem {
        tracing::warn!(%reason, "health check failed");
    }
    let status = if problem.is_none() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(HealthResponse {
            ok: problem.is_none(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs,
            error: problem.map(|_| "storage unavailable".to_string()),
        }),
    )
}
