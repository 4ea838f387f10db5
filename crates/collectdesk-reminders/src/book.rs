// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory reminder collection and its rollups.

use chrono::NaiveDateTime;

use collectdesk_config::model::WeekStart;
use collectdesk_core::CallbackId;

use crate::metrics::{AggregateMetrics, MetricsCache, recompute};
use crate::types::Reminder;

/// Reminders loaded for one view, ordered by due instant, plus their
/// cached metrics.
///
/// Mutators are crate-private: [`ReminderService`](crate::ReminderService)
/// is the only writer, and applies a change here only after the store
/// accepted it.
#[derive(Debug, Clone)]
pub struct ReminderBook {
    reminders: Vec<Reminder>,
    cache: MetricsCache,
    week_start: WeekStart,
}

impl ReminderBook {
    pub fn new(week_start: WeekStart) -> Self {
        Self {
            reminders: Vec::new(),
            cache: MetricsCache::new(week_start),
            week_start,
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn get(&self, id: &CallbackId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Metrics valid for `now`. Rebuilds first if the day rolled over.
    pub fn metrics(&mut self, now: NaiveDateTime) -> AggregateMetrics {
        self.cache.current(&self.reminders, now)
    }

    /// Whether the cached counters match a full recompute.
    pub fn is_consistent(&self, now: NaiveDateTime) -> bool {
        self.cache.anchor() != Some(now.date())
            || *self.cache.metrics() == recompute(&self.reminders, now, self.week_start)
    }

    /// Replace the whole collection and recompute from scratch.
    pub(crate) fn replace_all(&mut self, mut reminders: Vec<Reminder>, now: NaiveDateTime) {
        reminders.sort_by_key(|r| r.due_at);
        self.reminders = reminders;
        self.cache.rebuild(&self.reminders, now);
    }

    /// Add a reminder in due order, replacing one with the same id.
    pub(crate) fn insert(&mut self, reminder: Reminder, now: NaiveDateTime) {
        if let Some(pos) = self.position(&reminder.id) {
            let before = self.reminders.remove(pos);
            self.cache.on_delete(&before, &self.reminders, now);
        }
        let at = self.reminders.partition_point(|r| r.due_at <= reminder.due_at);
        self.reminders.insert(at, reminder);
        self.cache.on_add(&self.reminders[at], &self.reminders, now);
        self.check(now);
    }

    /// Mark a reminder completed.
    ///
    /// Returns `Some(true)` if it changed, `Some(false)` if it was already
    /// completed, and `None` if the book does not hold it.
    pub(crate) fn complete(&mut self, id: &CallbackId, now: NaiveDateTime) -> Option<bool> {
        let pos = self.position(id)?;
        if self.reminders[pos].is_completed {
            return Some(false);
        }
        let before = self.reminders[pos].clone();
        self.reminders[pos].is_completed = true;
        self.cache
            .on_update(&before, &self.reminders[pos], &self.reminders, now);
        self.check(now);
        Some(true)
    }

    /// Remove a reminder, returning it if the book held it.
    pub(crate) fn remove(&mut self, id: &CallbackId, now: NaiveDateTime) -> Option<Reminder> {
        let pos = self.position(id)?;
        let removed = self.reminders.remove(pos);
        self.cache.on_delete(&removed, &self.reminders, now);
        self.check(now);
        Some(removed)
    }

    fn position(&self, id: &CallbackId) -> Option<usize> {
        self.reminders.iter().position(|r| &r.id == id)
    }

    fn check(&self, now: NaiveDateTime) {
        debug_assert!(
            self.is_consistent(now),
            "incremental metrics diverged from recompute"
        );
    }
}
