// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Due items grouped into buckets for display.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::classifier::{Bucket, BucketProfile, diff_minutes};
use crate::types::Reminder;

/// Anything with a due instant that can be settled.
pub trait Due {
    fn due_at(&self) -> NaiveDateTime;

    /// Settled items (completed callbacks, paid installments) leave the board.
    fn is_settled(&self) -> bool;
}

impl Due for Reminder {
    fn due_at(&self) -> NaiveDateTime {
        self.due_at
    }

    fn is_settled(&self) -> bool {
        self.is_completed
    }
}

/// One item on the board with its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardEntry<T> {
    pub item: T,
    pub diff_minutes: i64,
    pub proximity: String,
}

/// Unsettled items split into buckets, each ordered by due instant.
///
/// Built fresh against a given "now"; never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueBoard<T> {
    #[serde(skip)]
    pub profile: BucketProfile,
    pub now: NaiveDateTime,
    pub overdue: Vec<BoardEntry<T>>,
    pub due_now: Vec<BoardEntry<T>>,
    pub upcoming: Vec<BoardEntry<T>>,
}

impl<T: Due> DueBoard<T> {
    /// Classify `items` against `now` with `profile`.
    pub fn build(
        profile: &BucketProfile,
        items: impl IntoIterator<Item = T>,
        now: NaiveDateTime,
    ) -> Self {
        let mut open: Vec<T> = items.into_iter().filter(|i| !i.is_settled()).collect();
        open.sort_by_key(Due::due_at);

        let mut board = Self::empty(profile, now);
        for item in open {
            let diff = diff_minutes(item.due_at(), now);
            let entry = BoardEntry {
                proximity: profile.proximity(diff),
                diff_minutes: diff,
                item,
            };
            match profile.classify(diff) {
                Bucket::Overdue => board.overdue.push(entry),
                Bucket::DueNow => board.due_now.push(entry),
                Bucket::Upcoming => board.upcoming.push(entry),
            }
        }
        board
    }
}

impl<T> DueBoard<T> {
    /// A board with nothing on it.
    pub fn empty(profile: &BucketProfile, now: NaiveDateTime) -> Self {
        Self {
            profile: *profile,
            now,
            overdue: Vec::new(),
            due_now: Vec::new(),
            upcoming: Vec::new(),
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[BoardEntry<T>] {
        match bucket {
            Bucket::Overdue => &self.overdue,
            Bucket::DueNow => &self.due_now,
            Bucket::Upcoming => &self.upcoming,
        }
    }

    pub fn len(&self) -> usize {
        self.overdue.len() + self.due_now.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{CALLBACKS, SETTLEMENTS};
    use collectdesk_core::parse_datetime;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str, bool);

    impl Due for Item {
        fn due_at(&self) -> NaiveDateTime {
            parse_datetime(self.0).unwrap()
        }

        fn is_settled(&self) -> bool {
            self.1
        }
    }

    fn now() -> NaiveDateTime {
        parse_datetime("2025-03-10T10:00:00").unwrap()
    }

    #[test]
    fn groups_and_orders_open_items() {
        let items = vec![
            Item("2025-03-10T12:00", false),
            Item("2025-03-10T10:10", false),
            Item("2025-03-10T08:00", false),
            Item("2025-03-10T09:50", false),
            Item("2025-03-10T10:05", true),
        ];
        let board = DueBoard::build(&CALLBACKS, items, now());

        assert_eq!(board.len(), 4);
        assert_eq!(board.overdue[0].proximity, "2 hours ago");
        let now_items: Vec<_> = board.due_now.iter().map(|e| e.item.0).collect();
        assert_eq!(now_items, ["2025-03-10T09:50", "2025-03-10T10:10"]);
        assert_eq!(board.bucket(Bucket::Upcoming)[0].proximity, "in 2 hours");
    }

    #[test]
    fn same_items_differ_by_profile() {
        let items = vec![Item("2025-03-10T09:15", false)];
        let callbacks = DueBoard::build(&CALLBACKS, items.clone(), now());
        let settlements = DueBoard::build(&SETTLEMENTS, items, now());
        assert_eq!(callbacks.overdue.len(), 1);
        assert_eq!(settlements.due_now.len(), 1);
        assert_eq!(settlements.due_now[0].proximity, "45 minutes overdue");
    }

    #[test]
    fn settled_only_is_empty() {
        let board = DueBoard::build(&CALLBACKS, vec![Item("2025-03-10T10:00", true)], now());
        assert!(board.is_empty());
    }
}
