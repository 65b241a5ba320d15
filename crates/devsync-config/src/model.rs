// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for DevSync.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level DevSync configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DevsyncConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token and password settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// WebSocket relay settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port. `0` picks a free port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow any origin, method and header.
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: true,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

/// Authentication configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens. The server refuses to start
    /// without one.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Lifetime of an issued token.
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: u64,

    /// Minimum password length accepted at registration.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[redacted]"))
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("min_password_len", &self.min_password_len)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_minutes: default_token_ttl_minutes(),
            min_password_len: default_min_password_len(),
        }
    }
}

fn default_token_ttl_minutes() -> u64 {
    120
}

fn default_min_password_len() -> usize {
    6
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: true,
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("devsync").join("devsync.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("devsync.db"))
        .to_string_lossy()
        .into_owned()
}

/// WebSocket relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RealtimeConfig {
    /// Outbound frames buffered per connection before new frames are dropped.
    #[serde(default = "default_connection_buffer")]
    pub connection_buffer: usize,

    /// Require a token on upgrade and check the role on join and relay.
    /// Turning this off restores the open relay.
    #[serde(default = "default_true")]
    pub authenticate_join: bool,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            connection_buffer: default_connection_buffer(),
            authenticate_join: true,
        }
    }
}

fn default_connection_buffer() -> usize {
    64
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DevsyncConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.cors_permissive);
        assert!(config.auth.jwt_secret.is_none());
        assert_eq!(config.auth.token_ttl_minutes, 120);
        assert_eq!(config.auth.min_password_len, 6);
        assert!(config.storage.database_path.ends_with("devsync.db"));
        assert!(config.storage.wal_mode);
        assert_eq!(config.realtime.connection_buffer, 64);
        assert!(config.realtime.authenticate_join);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn debug_redacts_secret() {
        let auth = AuthConfig {
            jwt_secret: Some("super-secret-signing-key".into()),
            ..AuthConfig::default()
        };
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = toml::from_str::<DevsyncConfig>("[telegram]\nbot_token = \"x\"\n");
        assert!(result.is_err());
    }
}
