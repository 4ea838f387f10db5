// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./collectdesk.toml` > `~/.config/collectdesk/collectdesk.toml`
//! > `/etc/collectdesk/collectdesk.toml` with environment variable overrides via
//! the `COLLECTDESK_` prefix.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CollectdeskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/collectdesk/collectdesk.toml` (system-wide)
/// 3. `~/.config/collectdesk/collectdesk.toml` (user XDG config)
/// 4. `./collectdesk.toml` (local directory)
/// 5. `COLLECTDESK_*` environment variables
pub fn load_config() -> Result<CollectdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CollectdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CollectdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CollectdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CollectdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CollectdeskConfig::default()))
        .merge(Toml::file("/etc/collectdesk/collectdesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("collectdesk/collectdesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("collectdesk.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `COLLECTDESK_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys themselves
/// contain underscores: `COLLECTDESK_REMINDERS_TICK_INTERVAL_SECS` must map to
/// `reminders.tick_interval_secs`.
fn env_provider() -> Env {
    Env::prefixed("COLLECTDESK_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("log_", "log.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("reminders_", "reminders.", 1);
        mapped.into()
    })
}
