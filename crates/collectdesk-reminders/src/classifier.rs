// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Due-time classification.
//!
//! A due instant is compared with "now" in whole minutes and sorted into one
//! of three buckets. Each view that shows due items has its own
//! [`BucketProfile`]: the callback view and the settlement view use
//! different windows and different wording, and are kept apart.

use chrono::NaiveDateTime;
use serde::Serialize;
use strum::{Display, EnumIter};

/// Where a due item sits relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Overdue,
    DueNow,
    Upcoming,
}

/// Phrases used to describe proximity in one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wording {
    /// Appended to past durations, e.g. `ago`.
    pub past_suffix: &'static str,
    /// Precedes future durations under an hour, e.g. `due in`.
    pub minutes_prefix: &'static str,
    /// Precedes future durations of an hour or more.
    pub hours_prefix: &'static str,
}

/// Thresholds, labels, and wording for one due-items view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketProfile {
    pub name: &'static str,
    /// Inclusive half-width of the due-now window, in minutes.
    pub window_minutes: i64,
    /// Labels for overdue, due-now, and upcoming, in that order.
    pub labels: [&'static str; 3],
    pub wording: Wording,
}

/// The callbacks view: due-now within 15 minutes either side.
pub const CALLBACKS: BucketProfile = BucketProfile {
    name: "callbacks",
    window_minutes: 15,
    labels: ["past", "now", "upcoming"],
    wording: Wording {
        past_suffix: "ago",
        minutes_prefix: "due in",
        hours_prefix: "in",
    },
};

/// The settlement payments-due view: due-now within an hour either side.
pub const SETTLEMENTS: BucketProfile = BucketProfile {
    name: "settlements",
    window_minutes: 60,
    labels: ["overdue", "due-now", "upcoming"],
    wording: Wording {
        past_suffix: "overdue",
        minutes_prefix: "due in",
        hours_prefix: "due in",
    },
};

/// Signed whole minutes from `now` until `due`, truncated toward zero.
pub fn diff_minutes(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (due - now).num_minutes()
}

impl BucketProfile {
    pub fn classify(&self, diff_minutes: i64) -> Bucket {
        if diff_minutes < -self.window_minutes {
            Bucket::Overdue
        } else if diff_minutes <= self.window_minutes {
            Bucket::DueNow
        } else {
            Bucket::Upcoming
        }
    }

    /// Classify `due` against `now`.
    pub fn classify_at(&self, due: NaiveDateTime, now: NaiveDateTime) -> Bucket {
        self.classify(diff_minutes(due, now))
    }

    /// This view's label for `bucket`.
    pub fn label(&self, bucket: Bucket) -> &'static str {
        match bucket {
            Bucket::Overdue => self.labels[0],
            Bucket::DueNow => self.labels[1],
            Bucket::Upcoming => self.labels[2],
        }
    }

    /// Human-readable distance to the due instant.
    ///
    /// Past durations beyond an hour are floored to hours (so 61 minutes
    /// late reads as 2 hours). Past minutes are never singularized.
    pub fn proximity(&self, diff_minutes: i64) -> String {
        let w = &self.wording;
        if diff_minutes < -60 {
            let hours = diff_minutes.div_euclid(60).abs();
            format!("{hours} {} {}", plural(hours, "hour"), w.past_suffix)
        } else if diff_minutes < 0 {
            format!("{} minutes {}", diff_minutes.abs(), w.past_suffix)
        } else if diff_minutes < 60 {
            format!(
                "{} {diff_minutes} {}",
                w.minutes_prefix,
                plural(diff_minutes, "minute")
            )
        } else {
            let hours = diff_minutes / 60;
            format!("{} {hours} {}", w.hours_prefix, plural(hours, "hour"))
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collectdesk_core::parse_datetime;

    #[test]
    fn callback_boundaries() {
        assert_eq!(CALLBACKS.classify(-16), Bucket::Overdue);
        assert_eq!(CALLBACKS.classify(-15), Bucket::DueNow);
        assert_eq!(CALLBACKS.classify(0), Bucket::DueNow);
        assert_eq!(CALLBACKS.classify(15), Bucket::DueNow);
        assert_eq!(CALLBACKS.classify(16), Bucket::Upcoming);
    }

    #[test]
    fn settlement_boundaries() {
        assert_eq!(SETTLEMENTS.classify(-61), Bucket::Overdue);
        assert_eq!(SETTLEMENTS.classify(-60), Bucket::DueNow);
        assert_eq!(SETTLEMENTS.classify(60), Bucket::DueNow);
        assert_eq!(SETTLEMENTS.classify(61), Bucket::Upcoming);
        // Inside the settlement window but outside the callback one.
        assert_eq!(SETTLEMENTS.classify(-30), Bucket::DueNow);
        assert_eq!(CALLBACKS.classify(-30), Bucket::Overdue);
    }

    #[test]
    fn diff_truncates_toward_zero() {
        let now = parse_datetime("2025-03-10T10:00:00").unwrap();
        let ahead = parse_datetime("2025-03-10T10:15:59").unwrap();
        let behind = parse_datetime("2025-03-10T09:44:01").unwrap();
        assert_eq!(diff_minutes(ahead, now), 15);
        assert_eq!(diff_minutes(behind, now), -15);
        assert_eq!(CALLBACKS.classify_at(behind, now), Bucket::DueNow);
    }

    #[test]
    fn callback_wording() {
        assert_eq!(CALLBACKS.proximity(10), "due in 10 minutes");
        assert_eq!(CALLBACKS.proximity(1), "due in 1 minute");
        assert_eq!(CALLBACKS.proximity(0), "due in 0 minutes");
        assert_eq!(CALLBACKS.proximity(60), "in 1 hour");
        assert_eq!(CALLBACKS.proximity(120), "in 2 hours");
        assert_eq!(CALLBACKS.proximity(-1), "1 minutes ago");
        assert_eq!(CALLBACKS.proximity(-60), "60 minutes ago");
        assert_eq!(CALLBACKS.proximity(-61), "2 hours ago");
        assert_eq!(CALLBACKS.proximity(-120), "2 hours ago");
    }

    #[test]
    fn settlement_wording() {
        assert_eq!(SETTLEMENTS.proximity(-90), "2 hours overdue");
        assert_eq!(SETTLEMENTS.proximity(-5), "5 minutes overdue");
        assert_eq!(SETTLEMENTS.proximity(45), "due in 45 minutes");
        assert_eq!(SETTLEMENTS.proximity(180), "due in 3 hours");
    }

    #[test]
    fn labels_are_per_view() {
        assert_eq!(CALLBACKS.label(Bucket::Overdue), "past");
        assert_eq!(CALLBACKS.label(Bucket::DueNow), "now");
        assert_eq!(SETTLEMENTS.label(Bucket::Overdue), "overdue");
        assert_eq!(SETTLEMENTS.label(Bucket::DueNow), "due-now");
    }

    #[test]
    fn morning_scenario() {
        let now = parse_datetime("2025-03-10T10:00:00").unwrap();
        let cases = [
            ("2025-03-10T10:10:00", Bucket::DueNow, "due in 10 minutes"),
            ("2025-03-10T08:00:00", Bucket::Overdue, "2 hours ago"),
            ("2025-03-10T12:00:00", Bucket::Upcoming, "in 2 hours"),
        ];
        for (due, bucket, text) in cases {
            let diff = diff_minutes(parse_datetime(due).unwrap(), now);
            assert_eq!(CALLBACKS.classify(diff), bucket, "{due}");
            assert_eq!(CALLBACKS.proximity(diff), text, "{due}");
        }
    }
}
