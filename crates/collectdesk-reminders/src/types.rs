// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder read-model types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use collectdesk_core::CallbackId;

/// Kind of work a reminder represents.
///
/// Callbacks are the only kind projected from stored data today; the other
/// kinds still get their own rollup counters.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReminderType {
    Callback,
    FollowUp,
    Payment,
    Other,
}

/// Display priority of a reminder.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A callback as the reminder views see it.
///
/// Never persisted: every field is derived from a stored
/// [`Callback`](collectdesk_core::Callback) by [`crate::project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: CallbackId,
    pub title: String,
    pub details: String,
    /// Debtor reference, absent for callbacks with no account.
    pub account_number: Option<String>,
    pub reminder_type: ReminderType,
    pub priority: Priority,
    pub due_date: NaiveDate,
    /// 24-hour `HH:MM`.
    pub due_time: String,
    /// Full due instant, kept for classification.
    pub due_at: NaiveDateTime,
    pub is_completed: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}
