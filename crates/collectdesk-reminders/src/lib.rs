// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback reminders for Collectdesk.
//!
//! Stored callbacks are projected into [`Reminder`]s, rolled up into
//! [`AggregateMetrics`], and classified into overdue / due-now / upcoming
//! buckets relative to the current time. [`ReminderService`] is the single
//! writer of the in-memory collection and keeps it in step with the store;
//! [`DueTicker`] re-classifies it on a fixed period.

pub mod board;
pub mod book;
pub mod classifier;
pub mod metrics;
pub mod projection;
pub mod service;
pub mod settlement;
pub mod sweep;
pub mod ticker;
pub mod types;

pub use board::{BoardEntry, Due, DueBoard};
pub use book::ReminderBook;
pub use classifier::{Bucket, BucketProfile, CALLBACKS, SETTLEMENTS, Wording, diff_minutes};
pub use metrics::{AggregateMetrics, MetricsCache, TypeCounts, recompute};
pub use projection::project;
pub use service::{Completion, Operation, ReminderEvent, ReminderService, Scope};
pub use settlement::{SettlementInstallment, payments_due};
pub use sweep::MissedSweep;
pub use ticker::{DueTicker, TickerSettings};
pub use types::{Priority, Reminder, ReminderType};
