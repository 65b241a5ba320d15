// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./devsync.toml` > `~/.config/devsync/devsync.toml` > `/etc/devsync/devsync.toml`
//! with environment variable overrides via `DEVSYNC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DevsyncConfig;

/// Top-level sections, used to map `DEVSYNC_<SECTION>_<KEY>` onto `section.key`.
const SECTIONS: &[&str] = &["server", "auth", "storage", "realtime", "log"];

pub(crate) const SYSTEM_CONFIG: &str = "/etc/devsync/devsync.toml";
pub(crate) const LOCAL_CONFIG: &str = "devsync.toml";

pub(crate) fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("devsync/devsync.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/devsync/devsync.toml` (system-wide)
/// 3. `~/.config/devsync/devsync.toml` (user XDG config)
/// 4. `./devsync.toml` (local directory)
/// 5. `DEVSYNC_*` environment variables
pub fn load_config() -> Result<DevsyncConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<DevsyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DevsyncConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DevsyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DevsyncConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DevsyncConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Create the environment variable provider with explicit section mapping.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `DEVSYNC_AUTH_JWT_SECRET` maps to `auth.jwt_secret`, not `auth.jwt.secret`.
fn env_provider() -> Env {
    Env::prefixed("DEVSYNC_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("auth_jwt_secret"), "auth.jwt_secret");
        assert_eq!(map_env_key("server_port"), "server.port");
        assert_eq!(
            map_env_key("realtime_authenticate_join"),
            "realtime.authenticate_join"
        );
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
        assert_eq!(map_env_key("log_level"), "log.level");
    }

    #[test]
    fn unknown_prefix_is_left_alone() {
        assert_eq!(map_env_key("something_else"), "something_else");
        assert_eq!(map_env_key("authx_key"), "authx_key");
    }
}
