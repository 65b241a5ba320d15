// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Readiness gate polled before a client proceeds.
//!
//! A freshly deployed or idle server can take a while to answer. The gate
//! probes `GET /health` until it succeeds, sleeping with bounded exponential
//! backoff between attempts.

use std::time::Duration;

use async_trait::async_trait;
use devsync_core::DevsyncError;

/// Per-request timeout of the HTTP probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(7);

/// One readiness check.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn probe(&self) -> bool;
}

/// Probes `<base_url>/health` and requires a 2xx with `ok: true`.
pub struct HttpHealthProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpHealthProbe {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: format!("{}/health", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ReadinessProbe for HttpHealthProbe {
    async fn probe(&self) -> bool {
        let resp = match self.client.get(&self.url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                let reason = if e.is_timeout() {
                    "timeout".to_string()
                } else if e.is_connect() {
                    "connection refused".to_string()
                } else {
                    e.to_string()
                };
                tracing::debug!(url = %self.url, %reason, "health probe failed");
                return false;
            }
        };
        if !resp.status().is_success() {
            tracing::debug!(url = %self.url, status = %resp.status(), "server not ready");
            return false;
        }
        match resp.json::<serde_json::Value>().await {
            Ok(body) => body.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
            Err(_) => false,
        }
    }
}

/// Exponential backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub initial: Duration,
    pub factor: u32,
    pub cap: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            factor: 2,
            cap: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    /// Delay after the `attempt`-th failure (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let multiplier = self.factor.checked_pow(exponent).unwrap_or(u32::MAX);
        self.initial
            .checked_mul(multiplier)
            .unwrap_or(self.cap)
            .min(self.cap)
    }
}

pub struct ReadinessGate<P> {
    probe: P,
    backoff: Backoff,
    max_attempts: u32,
}

impl<P: ReadinessProbe> ReadinessGate<P> {
    pub fn new(probe: P, backoff: Backoff, max_attempts: u32) -> Self {
        Self {
            probe,
            backoff,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Poll until the probe passes. Returns the number of attempts used, or
    /// `Timeout` with the total time slept once `max_attempts` have failed.
    pub async fn wait_ready(&self) -> Result<u32, DevsyncError> {
        let mut waited = Duration::ZERO;
        for attempt in 1..=self.max_attempts {
            if self.probe.probe().await {
                tracing::info!(attempt, "server ready");
                return Ok(attempt);
            }
            if attempt == self.max_attempts {
                break;
            }
            let delay = self.backoff.delay(attempt);
            tracing::debug!(attempt, ?delay, "server not ready, backing off");
            tokio::time::sleep(delay).await;
            waited += delay;
        }
        Err(DevsyncError::Timeout { duration: waited })
    }
}
