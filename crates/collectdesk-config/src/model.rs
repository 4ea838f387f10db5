// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Collectdesk callback engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Collectdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CollectdeskConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Reminder engine settings.
    #[serde(default)]
    pub reminders: ReminderConfig,
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

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("collectdesk").join("collectdesk.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("collectdesk.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// First calendar day of the trailing week window used by the metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

/// Reminder engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReminderConfig {
    /// Seconds between due-board re-evaluations.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// The deployment zone as minutes east of UTC. All due instants are
    /// wall-clock times in this zone.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// First day of the week for the weekly rollup.
    #[serde(default)]
    pub week_start: WeekStart,

    /// Pending callbacks overdue by more than this many minutes are flipped
    /// to `missed` by the sweep. Unset disables the sweep entirely.
    #[serde(default)]
    pub missed_after_minutes: Option<u32>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            utc_offset_minutes: 0,
            week_start: WeekStart::default(),
            missed_after_minutes: None,
        }
    }
}

fn default_tick_interval_secs() -> u64 {
    60
}
