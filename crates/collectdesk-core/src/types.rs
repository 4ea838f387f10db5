// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback entity types shared by the store, the engine, and the CLI.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CollectError;
use crate::time::parse_datetime;

/// Reserved debtor id meaning "no associated account".
pub const UNASSIGNED_DEBTOR: &str = "00000000-0000-0000-0000-000000000000";

/// Server-assigned identifier of a stored callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallbackId(pub String);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallbackId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reference to the debtor account a callback concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebtorId(pub String);

impl DebtorId {
    /// The sentinel id for callbacks with no account.
    pub fn unassigned() -> Self {
        Self(UNASSIGNED_DEBTOR.to_string())
    }

    /// Whether this is the "no associated account" sentinel.
    pub fn is_unassigned(&self) -> bool {
        self.0 == UNASSIGNED_DEBTOR
    }
}

impl fmt::Display for DebtorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a callback.
///
/// The only first-class transition is `Pending -> Completed`. `Missed` is
/// set only by the opt-in missed sweep.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CallbackStatus {
    Pending,
    Completed,
    Missed,
}

/// A scheduled callback, as persisted by a [`CallbackStore`](crate::CallbackStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callback {
    pub id: CallbackId,
    pub agent_id: String,
    /// Denormalized display name; may be stale relative to the users table.
    pub agent_name: Option<String>,
    pub debtor_id: DebtorId,
    pub phone_number: String,
    /// Deployment-local instant the callback is due.
    pub callback_date: NaiveDateTime,
    pub notes: String,
    pub status: CallbackStatus,
    pub created_at: NaiveDateTime,
}

/// Caller-supplied fields for a new callback, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackInput {
    pub agent_id: String,
    pub agent_name: Option<String>,
    /// `None` (or the sentinel) means no associated account.
    pub debtor_id: Option<String>,
    pub phone_number: String,
    /// Due instant as entered, e.g. `2025-03-10T10:00`.
    pub callback_date: String,
    pub notes: Option<String>,
}

/// A [`CallbackInput`] that passed validation, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCallback {
    pub agent_id: String,
    pub agent_name: Option<String>,
    pub debtor_id: DebtorId,
    pub phone_number: String,
    pub callback_date: NaiveDateTime,
    pub notes: String,
}

impl CallbackInput {
    /// Check required fields and parse the due instant.
    ///
    /// Blank optional strings collapse to their defaults: no agent name,
    /// the unassigned debtor sentinel, and empty notes.
    pub fn validate(&self) -> Result<NewCallback, CollectError> {
        let agent_id = self.agent_id.trim();
        if agent_id.is_empty() {
            return Err(CollectError::validation("agent_id", "agent id is required"));
        }

        let phone_number = self.phone_number.trim();
        if phone_number.is_empty() {
            return Err(CollectError::validation(
                "phone_number",
                "phone number is required",
            ));
        }

        if self.callback_date.trim().is_empty() {
            return Err(CollectError::validation(
                "callback_date",
                "callback date is required",
            ));
        }
        let callback_date = parse_datetime(&self.callback_date).ok_or_else(|| {
            CollectError::validation(
                "callback_date",
                format!("`{}` is not a valid date and time", self.callback_date),
            )
        })?;

        let debtor_id = match self.debtor_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => DebtorId(id.to_string()),
            _ => DebtorId::unassigned(),
        };

        Ok(NewCallback {
            agent_id: agent_id.to_string(),
            agent_name: self
                .agent_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            debtor_id,
            phone_number: phone_number.to_string(),
            callback_date,
            notes: self.notes.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn input() -> CallbackInput {
        CallbackInput {
            agent_id: "agent-7".into(),
            agent_name: Some("Dana".into()),
            debtor_id: Some("acct-1001".into()),
            phone_number: "+1 555 0100".into(),
            callback_date: "2025-03-10T10:10".into(),
            notes: Some("promised to pay Friday".into()),
        }
    }

    #[test]
    fn valid_input_parses() {
        let new = input().validate().unwrap();
        assert_eq!(new.agent_id, "agent-7");
        assert_eq!(new.debtor_id, DebtorId("acct-1001".into()));
        assert_eq!(new.callback_date.to_string(), "2025-03-10 10:10:00");
        assert_eq!(new.notes, "promised to pay Friday");
    }

    #[test]
    fn empty_phone_is_a_validation_error() {
        let mut bad = input();
        bad.phone_number = "   ".into();
        let err = bad.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("phone_number"));
    }

    #[test]
    fn missing_or_unparseable_date_is_a_validation_error() {
        let mut missing = input();
        missing.callback_date = String::new();
        let err = missing.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let mut garbage = input();
        garbage.callback_date = "next tuesday".into();
        let err = garbage.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("next tuesday"));
    }

    #[test]
    fn empty_agent_is_a_validation_error() {
        let mut bad = input();
        bad.agent_id = String::new();
        assert_eq!(bad.validate().unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn blank_optionals_take_defaults() {
        let mut sparse = input();
        sparse.agent_name = Some(" ".into());
        sparse.debtor_id = None;
        sparse.notes = None;
        let new = sparse.validate().unwrap();
        assert_eq!(new.agent_name, None);
        assert!(new.debtor_id.is_unassigned());
        assert_eq!(new.notes, "");
    }

    #[test]
    fn status_string_forms() {
        use std::str::FromStr;
        assert_eq!(CallbackStatus::Pending.to_string(), "pending");
        assert_eq!(
            CallbackStatus::from_str("missed").unwrap(),
            CallbackStatus::Missed
        );
        let json = serde_json::to_string(&CallbackStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
