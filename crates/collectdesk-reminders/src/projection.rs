// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from stored callbacks to reminders.

use collectdesk_core::{Callback, CallbackStatus};

use crate::types::{Priority, Reminder, ReminderType};

/// Details shown for a callback saved without notes.
pub const DETAILS_FALLBACK: &str = "No additional notes";

/// Project a stored callback into its reminder view.
///
/// Pure and deterministic: no clock, no I/O.
pub fn project(callback: &Callback) -> Reminder {
    let details = if callback.notes.trim().is_empty() {
        DETAILS_FALLBACK.to_string()
    } else {
        callback.notes.clone()
    };

    let account_number =
        (!callback.debtor_id.is_unassigned()).then(|| callback.debtor_id.0.clone());

    let created_by = callback
        .agent_name
        .clone()
        .unwrap_or_else(|| callback.agent_id.clone());

    Reminder {
        id: callback.id.clone(),
        title: format!("Call {}", callback.phone_number),
        details,
        account_number,
        reminder_type: ReminderType::Callback,
        priority: Priority::Medium,
        due_date: callback.callback_date.date(),
        due_time: callback.callback_date.format("%H:%M").to_string(),
        due_at: callback.callback_date,
        is_completed: callback.status == CallbackStatus::Completed,
        created_by,
        created_at: callback.created_at,
    }
}
