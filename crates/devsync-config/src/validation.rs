// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid listen addresses, non-empty paths and minimum secret length.

use crate::diagnostic::ConfigError;
use crate::model::DevsyncConfig;

/// Shortest accepted token signing secret.
pub const MIN_JWT_SECRET_LEN: usize = 16;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DevsyncConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if let Some(secret) = &config.auth.jwt_secret {
        if secret.chars().count() < MIN_JWT_SECRET_LEN {
            fail(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} characters"
            ));
        }
    }

    if config.auth.token_ttl_minutes == 0 {
        fail("auth.token_ttl_minutes must be greater than 0".to_string());
    }

    if config.realtime.connection_buffer == 0 {
        fail("realtime.connection_buffer must be greater than 0".to_string());
    }

    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "log.level `{}` is not one of {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &DevsyncConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&DevsyncConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = DevsyncConfig::default();
        config.storage.database_path = "  ".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("database_path")));
    }

    #[test]
    fn short_secret_fails_validation() {
        let mut config = DevsyncConfig::default();
        config.auth.jwt_secret = Some("short".into());
        assert!(messages(&config).iter().any(|m| m.contains("jwt_secret")));

        config.auth.jwt_secret = Some("0123456789abcdef".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_host_fails_validation() {
        let mut config = DevsyncConfig::default();
        config.server.host = "not a host!".into();
        assert!(messages(&config).iter().any(|m| m.contains("server.host")));

        config.server.host = "::1".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn errors_are_collected() {
        let mut config = DevsyncConfig::default();
        config.server.host = String::new();
        config.auth.token_ttl_minutes = 0;
        config.realtime.connection_buffer = 0;
        config.log.level = "loud".into();
        assert_eq!(messages(&config).len(), 4);
    }
}
