// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rollup counts over the reminder collection.
//!
//! [`recompute`] is the single definition of every counter. [`MetricsCache`]
//! keeps a running total between mutations by adding and subtracting the
//! per-reminder contribution that [`recompute`] sums, so the two paths share
//! one set of boundary rules. The cache rebuilds from scratch whenever the
//! reference date moves or a subtraction would go negative.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use collectdesk_config::model::WeekStart;

use crate::types::{Reminder, ReminderType};

/// Reminder count per [`ReminderType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub callback: u64,
    pub follow_up: u64,
    pub payment: u64,
    pub other: u64,
}

impl TypeCounts {
    /// Count for one type.
    pub fn get(&self, kind: ReminderType) -> u64 {
        match kind {
            ReminderType::Callback => self.callback,
            ReminderType::FollowUp => self.follow_up,
            ReminderType::Payment => self.payment,
            ReminderType::Other => self.other,
        }
    }

    fn slot(&mut self, kind: ReminderType) -> &mut u64 {
        match kind {
            ReminderType::Callback => &mut self.callback,
            ReminderType::FollowUp => &mut self.follow_up,
            ReminderType::Payment => &mut self.payment,
            ReminderType::Other => &mut self.other,
        }
    }
}

/// Rollup counters derived from a reminder collection and a reference instant.
///
/// Week and month counts are trailing partial periods: from the first day of
/// the period through today, not the full calendar period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateMetrics {
    pub today: u64,
    pub today_completed: u64,
    pub week: u64,
    pub month: u64,
    pub by_type: TypeCounts,
}

impl AggregateMetrics {
    fn add(&mut self, other: &AggregateMetrics) {
        self.today += other.today;
        self.today_completed += other.today_completed;
        self.week += other.week;
        self.month += other.month;
        self.by_type.callback += other.by_type.callback;
        self.by_type.follow_up += other.by_type.follow_up;
        self.by_type.payment += other.by_type.payment;
        self.by_type.other += other.by_type.other;
    }

    /// Subtract `other`, or `None` if any counter would go negative.
    fn checked_sub(&self, other: &AggregateMetrics) -> Option<AggregateMetrics> {
        Some(AggregateMetrics {
            today: self.today.checked_sub(other.today)?,
            today_completed: self.today_completed.checked_sub(other.today_completed)?,
            week: self.week.checked_sub(other.week)?,
            month: self.month.checked_sub(other.month)?,
            by_type: TypeCounts {
                callback: self.by_type.callback.checked_sub(other.by_type.callback)?,
                follow_up: self.by_type.follow_up.checked_sub(other.by_type.follow_up)?,
                payment: self.by_type.payment.checked_sub(other.by_type.payment)?,
                other: self.by_type.other.checked_sub(other.by_type.other)?,
            },
        })
    }
}

/// Date boundaries for one reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub month_start: NaiveDate,
}

impl Window {
    /// Boundaries for the day containing `now`.
    pub fn at(now: NaiveDateTime, week_start: WeekStart) -> Self {
        let today = now.date();
        let back = match week_start {
            WeekStart::Sunday => today.weekday().num_days_from_sunday(),
            WeekStart::Monday => today.weekday().num_days_from_monday(),
        };
        Self {
            today,
            week_start: today - Days::new(u64::from(back)),
            month_start: today.with_day(1).unwrap_or(today),
        }
    }

    /// What one reminder adds to each counter.
    pub fn contribution(&self, reminder: &Reminder) -> AggregateMetrics {
        let due = reminder.due_date;
        let is_today = due == self.today;
        let mut out = AggregateMetrics {
            today: u64::from(is_today),
            today_completed: u64::from(is_today && reminder.is_completed),
            week: u64::from(self.week_start <= due && due <= self.today),
            month: u64::from(self.month_start <= due && due <= self.today),
            by_type: TypeCounts::default(),
        };
        *out.by_type.slot(reminder.reminder_type) = 1;
        out
    }
}

/// Compute every counter from scratch.
pub fn recompute(
    reminders: &[Reminder],
    now: NaiveDateTime,
    week_start: WeekStart,
) -> AggregateMetrics {
    let window = Window::at(now, week_start);
    let mut totals = AggregateMetrics::default();
    for reminder in reminders {
        totals.add(&window.contribution(reminder));
    }
    totals
}

/// Running counters maintained across single-reminder mutations.
///
/// Every update method receives the post-mutation collection so it can fall
/// back to [`recompute`] instead of drifting.
#[derive(Debug, Clone)]
pub struct MetricsCache {
    week_start: WeekStart,
    window: Option<Window>,
    metrics: AggregateMetrics,
}

impl MetricsCache {
    pub fn new(week_start: WeekStart) -> Self {
        Self {
            week_start,
            window: None,
            metrics: AggregateMetrics::default(),
        }
    }

    /// The cached counters as of the last update.
    pub fn metrics(&self) -> &AggregateMetrics {
        &self.metrics
    }

    /// The day the counters were computed for, if any.
    pub fn anchor(&self) -> Option<NaiveDate> {
        self.window.map(|w| w.today)
    }

    /// Discard the running totals and recompute.
    pub fn rebuild(&mut self, reminders: &[Reminder], now: NaiveDateTime) -> AggregateMetrics {
        self.window = Some(Window::at(now, self.week_start));
        self.metrics = recompute(reminders, now, self.week_start);
        self.metrics
    }

    /// Counters valid for `now`, rebuilding if the day changed.
    pub fn current(&mut self, reminders: &[Reminder], now: NaiveDateTime) -> AggregateMetrics {
        match self.anchored_window(now) {
            Some(_) => self.metrics,
            None => self.rebuild(reminders, now),
        }
    }

    /// Account for `added`, now part of `after`.
    pub fn on_add(&mut self, added: &Reminder, after: &[Reminder], now: NaiveDateTime) {
        self.apply(None, Some(added), after, now);
    }

    /// Account for `before` having become `updated` inside `after`.
    pub fn on_update(
        &mut self,
        before: &Reminder,
        updated: &Reminder,
        after: &[Reminder],
        now: NaiveDateTime,
    ) {
        self.apply(Some(before), Some(updated), after, now);
    }

    /// Account for `removed`, no longer part of `after`.
    pub fn on_delete(&mut self, removed: &Reminder, after: &[Reminder], now: NaiveDateTime) {
        self.apply(Some(removed), None, after, now);
    }

    fn anchored_window(&self, now: NaiveDateTime) -> Option<Window> {
        self.window.filter(|w| w.today == now.date())
    }

    fn apply(
        &mut self,
        old: Option<&Reminder>,
        new: Option<&Reminder>,
        after: &[Reminder],
        now: NaiveDateTime,
    ) {
        let Some(window) = self.anchored_window(now) else {
            self.rebuild(after, now);
            return;
        };

        let mut next = match old {
            Some(r) => match self.metrics.checked_sub(&window.contribution(r)) {
                Some(m) => m,
                None => {
                    self.rebuild(after, now);
                    return;
                }
            },
            None => self.metrics,
        };
        if let Some(r) = new {
            next.add(&window.contribution(r));
        }
        self.metrics = next;
    }
}
