// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injectable source of "now".

use chrono::NaiveDateTime;

/// Supplies the current deployment-local instant.
///
/// The classifier and aggregator never read the wall clock themselves; they
/// take a `now` produced by a `Clock` so tests can pin it.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}
