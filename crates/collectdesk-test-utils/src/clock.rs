// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A clock pinned to a chosen instant.

use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime};
use collectdesk_core::{Clock, parse_datetime};

/// A [`Clock`] that returns a fixed instant until advanced or set.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Pin the clock at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Pin the clock at a date-time literal such as `2025-03-10T10:00:00`.
    ///
    /// Panics on an unparseable literal; intended for test fixtures only.
    pub fn at(literal: &str) -> Self {
        let now = parse_datetime(literal)
            .unwrap_or_else(|| panic!("invalid clock literal `{literal}`"));
        Self::new(now)
    }

    /// Move the clock forward (or backward, for negative durations).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    /// Jump the clock to `to`.
    pub fn set(&self, to: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
