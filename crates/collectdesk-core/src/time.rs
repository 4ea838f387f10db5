// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deployment-local wall-clock time.
//!
//! Every instant the engine handles is a [`NaiveDateTime`] in one deployment
//! zone, expressed as a fixed UTC offset. Nothing is converted between zones
//! after the clock reads it.

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

use crate::traits::Clock;

/// Canonical storage format for instants (`2025-03-10T10:00:00`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats accepted from callers when parsing a due instant.
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a deployment-local date-time in any accepted input format.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Render an instant in the canonical storage format.
pub fn format_datetime(at: &NaiveDateTime) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

/// Wall clock reading `Utc::now()` shifted into the deployment zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Create a clock for a deployment `offset_minutes` east of UTC.
    ///
    /// Offsets outside ±24h fall back to UTC; config validation rejects them
    /// before they get here.
    pub fn with_offset_minutes(offset_minutes: i32) -> Self {
        let offset =
            FixedOffset::east_opt(offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix());
        Self { offset }
    }

    /// Clock for a UTC deployment.
    pub fn utc() -> Self {
        Self::with_offset_minutes(0)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}
