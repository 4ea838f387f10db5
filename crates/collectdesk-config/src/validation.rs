// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, known log levels, and offset ranges.

use crate::diagnostic::ConfigError;
use crate::model::CollectdeskConfig;

/// Largest deployment offset accepted, in minutes (UTC+14:00).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CollectdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.reminders.tick_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "reminders.tick_interval_secs must be at least 1".to_string(),
        });
    }

    let offset = config.reminders.utc_offset_minutes;
    if offset.abs() > MAX_UTC_OFFSET_MINUTES {
        errors.push(ConfigError::Validation {
            message: format!(
                "reminders.utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}, got {offset}"
            ),
        });
    }

    if config.reminders.missed_after_minutes == Some(0) {
        errors.push(ConfigError::Validation {
            message: "reminders.missed_after_minutes must be at least 1 when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
