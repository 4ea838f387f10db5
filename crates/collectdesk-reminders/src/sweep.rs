// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opt-in transition of long-overdue callbacks to missed.

use chrono::{Duration, NaiveDateTime};

use collectdesk_config::model::ReminderConfig;
use collectdesk_core::CollectError;

use crate::service::ReminderService;

/// Marks pending callbacks missed once they are overdue by a fixed grace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissedSweep {
    grace: Duration,
}

impl MissedSweep {
    pub fn new(grace_minutes: u32) -> Self {
        Self {
            grace: Duration::minutes(i64::from(grace_minutes)),
        }
    }

    /// The configured sweep, or `None` when `missed_after_minutes` is unset.
    pub fn from_config(config: &ReminderConfig) -> Option<Self> {
        config.missed_after_minutes.map(Self::new)
    }

    /// Callbacks due strictly before this instant are swept.
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        now - self.grace
    }

    /// Run one sweep against the service's store and book.
    pub async fn run(&self, service: &ReminderService) -> Result<u64, CollectError> {
        service.mark_missed_before(self.cutoff(service.now())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collectdesk_core::parse_datetime;

    #[test]
    fn disabled_by_default() {
        assert_eq!(MissedSweep::from_config(&ReminderConfig::default()), None);
    }

    #[test]
    fn cutoff_subtracts_grace() {
        let sweep = MissedSweep::new(60);
        let now = parse_datetime("2025-03-10T10:00").unwrap();
        let expected = parse_datetime("2025-03-10T09:00").unwrap();
        assert_eq!(sweep.cutoff(now), expected);
    }
}
