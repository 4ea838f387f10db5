// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Collectdesk configuration system.

use std::path::Path;

use collectdesk_config::diagnostic::ConfigError;
use collectdesk_config::model::WeekStart;
use collectdesk_config::{load_and_validate_str, load_config_from_path, load_config_from_str};

/// Valid TOML with every known field deserializes.
#[test]
fn full_toml_deserializes() {
    let toml = r#"
[log]
level = "debug"

[storage]
database_path = "/tmp/collectdesk-test.db"
wal_mode = false

[reminders]
tick_interval_secs = 30
utc_offset_minutes = -300
week_start = "monday"
missed_after_minutes = 60
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/collectdesk-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.reminders.tick_interval_secs, 30);
    assert_eq!(config.reminders.utc_offset_minutes, -300);
    assert_eq!(config.reminders.week_start, WeekStart::Monday);
    assert_eq!(config.reminders.missed_after_minutes, Some(60));
}

/// An empty document yields the compiled defaults.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.log.level, "info");
    assert!(config.storage.wal_mode);
    assert_eq!(config.reminders.tick_interval_secs, 60);
    assert_eq!(config.reminders.utc_offset_minutes, 0);
    assert_eq!(config.reminders.week_start, WeekStart::Sunday);
    assert_eq!(config.reminders.missed_after_minutes, None);
    assert!(config.storage.database_path.ends_with("collectdesk.db"));
}

/// A misspelled key is rejected with a suggestion.
#[test]
fn unknown_key_gets_suggestion() {
    let toml = r#"
[reminders]
tick_intervl_secs = 30
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "tick_intervl_secs" && s == "tick_interval_secs"
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// An unknown section is rejected too.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[dialer]
enabled = true
"#;
    assert!(load_and_validate_str(toml).is_err());
}

/// A bad enum value names the accepted ones.
#[test]
fn unknown_week_start_lists_variants() {
    let toml = r#"
[reminders]
week_start = "mondy"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject bad weekday");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownValue { value, suggestion: Some(s), .. }
                if value == "mondy" && s == "monday"
        )
    });
    assert!(found, "expected UnknownValue, got: {errors:?}");
}

/// Wrong value types are reported as InvalidType.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[reminders]
tick_interval_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject string for integer");
    let names_key = |e: &ConfigError| match e {
        ConfigError::InvalidType { key, .. } => key.contains("tick_interval_secs"),
        _ => false,
    };
    assert!(errors.iter().any(names_key), "got: {errors:?}");
}

/// Semantic validation runs after a successful parse.
#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[reminders]
utc_offset_minutes = 2000
"#;

    let errors = load_and_validate_str(toml).expect_err("offset out of range");
    let names_offset = |e: &ConfigError| match e {
        ConfigError::Validation { message } => message.contains("utc_offset_minutes"),
        _ => false,
    };
    assert!(errors.iter().any(names_offset), "got: {errors:?}");
}

/// Environment variables override file values, with underscores inside keys
/// mapped to the right section.
#[test]
fn env_overrides_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "collectdesk.toml",
            r#"
[reminders]
tick_interval_secs = 30
"#,
        )?;
        jail.set_env("COLLECTDESK_REMINDERS_TICK_INTERVAL_SECS", "15");
        jail.set_env("COLLECTDESK_REMINDERS_MISSED_AFTER_MINUTES", "90");
        jail.set_env(
            "COLLECTDESK_STORAGE_DATABASE_PATH",
            "/var/lib/collectdesk/cd.db",
        );
        jail.set_env("COLLECTDESK_LOG_LEVEL", "warn");

        let config = load_config_from_path(Path::new("collectdesk.toml"))?;
        assert_eq!(config.reminders.tick_interval_secs, 15);
        assert_eq!(config.reminders.missed_after_minutes, Some(90));
        assert_eq!(config.storage.database_path, "/var/lib/collectdesk/cd.db");
        assert_eq!(config.log.level, "warn");
        Ok(())
    });
}
