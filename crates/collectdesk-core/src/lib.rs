// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Collectdesk callback engine.
//!
//! This crate provides the callback entity, the error taxonomy, the
//! deployment-local time model, and the trait seams ([`CallbackStore`],
//! [`Clock`]) that storage backends and tests plug into.

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{CollectError, ErrorKind};
pub use time::{SystemClock, format_datetime, parse_datetime};
pub use traits::{CallbackStore, Clock};
pub use types::{
    Callback, CallbackId, CallbackInput, CallbackStatus, DebtorId, NewCallback,
    UNASSIGNED_DEBTOR,
};
